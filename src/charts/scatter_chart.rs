use crate::charts::axes::{AxisSpec, push_axes};
use crate::charts::style::DARK_SLATE_GREY;
use crate::charts::ChartTheme;
use crate::core::{DataPoint, LinearScale, Margins, PlotArea, project_point};
use crate::error::DashResult;
use crate::generators::{ScatterFrame, ScatterGenerator};
use crate::render::{CirclePrimitive, Color, RenderFrame};

/// Both axes are pinned to this range regardless of the sampled points.
pub const AXIS_RANGE: (f64, f64) = (-4.0, 4.0);
pub const X_AXIS_TITLE: &str = "Confetti 😊";
/// Marker diameter in pixels.
pub const MARKER_SIZE: f64 = 10.0;
pub const MARKER_OUTLINE_WIDTH: f64 = 2.0;

/// Confetti scatter: one frame of points plus its fixed layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub frame: ScatterFrame,
    pub show_legend: bool,
}

impl ScatterChart {
    #[must_use]
    pub fn new(frame: ScatterFrame) -> Self {
        Self {
            frame,
            show_legend: false,
        }
    }

    /// Materializes the chart. Points outside the pinned range are still
    /// emitted; they simply land off the plot area.
    pub fn to_frame(&self, theme: &ChartTheme) -> DashResult<RenderFrame> {
        let area = PlotArea::inside(theme.viewport, Margins::zero())?;
        let x_scale = LinearScale::new(AXIS_RANGE.0, AXIS_RANGE.1)?;
        let y_scale = LinearScale::new(AXIS_RANGE.0, AXIS_RANGE.1)?;

        let x_axis = AxisSpec::new(x_scale)
            .with_labels_inside(true)
            .with_title(X_AXIS_TITLE);
        let y_axis = AxisSpec::new(y_scale).with_labels_inside(true);

        let frame = RenderFrame::new(theme.viewport).with_background(theme.paper_background);
        let mut frame = push_axes(frame, area, &x_axis, &y_axis, theme)?;

        for point in &self.frame.points {
            let (cx, cy) = project_point(DataPoint::new(point.x, point.y), x_scale, y_scale, area)?;
            frame = frame.with_circle(CirclePrimitive::new(
                cx,
                cy,
                MARKER_SIZE / 2.0,
                Color::from_hex(&point.color)?,
                MARKER_OUTLINE_WIDTH,
                DARK_SLATE_GREY,
            ));
        }

        Ok(frame)
    }
}

/// Samples a fresh confetti frame of `point_count` points.
pub fn render_frame(generator: &mut ScatterGenerator, point_count: usize) -> ScatterChart {
    ScatterChart::new(generator.render_frame(point_count))
}

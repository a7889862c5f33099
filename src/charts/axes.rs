use crate::charts::ChartTheme;
use crate::core::{LinearScale, PlotArea};
use crate::error::DashResult;
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

const TICK_LABEL_GAP_PX: f64 = 6.0;

/// One axis: its scale, tick density, label formatting and optional title.
#[derive(Debug, Clone)]
pub struct AxisSpec {
    pub scale: LinearScale,
    pub tick_count: usize,
    pub title: Option<String>,
    /// Draw tick labels inside the plot area (used when margins are zero).
    pub labels_inside: bool,
    /// Drop fractional ticks, e.g. for day-granular axes.
    pub integer_ticks: bool,
    pub format: fn(f64) -> String,
}

impl AxisSpec {
    #[must_use]
    pub fn new(scale: LinearScale) -> Self {
        Self {
            scale,
            tick_count: 8,
            title: None,
            labels_inside: false,
            integer_ticks: false,
            format: format_number,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    #[must_use]
    pub fn with_labels_inside(mut self, labels_inside: bool) -> Self {
        self.labels_inside = labels_inside;
        self
    }

    #[must_use]
    pub fn with_integer_ticks(mut self, integer_ticks: bool) -> Self {
        self.integer_ticks = integer_ticks;
        self
    }

    #[must_use]
    pub fn ticks(&self) -> Vec<f64> {
        let mut ticks = self.scale.nice_ticks(self.tick_count);
        if self.integer_ticks {
            ticks.retain(|tick| tick.fract() == 0.0);
        }
        ticks
    }

    #[must_use]
    pub fn with_format(mut self, format: fn(f64) -> String) -> Self {
        self.format = format;
        self
    }
}

/// Appends the plot background, grid lines, tick labels and axis titles.
pub fn push_axes(
    mut frame: RenderFrame,
    area: PlotArea,
    x_axis: &AxisSpec,
    y_axis: &AxisSpec,
    theme: &ChartTheme,
) -> DashResult<RenderFrame> {
    frame = frame.with_rect(RectPrimitive::new(
        area.left,
        area.top,
        area.width,
        area.height,
        theme.plot_background,
    ));

    let font = theme.tick_font_size_px;

    for tick in x_axis.ticks() {
        let x = x_axis.scale.domain_to_pixel(tick, area.horizontal_span())?;
        let color = if tick == 0.0 {
            theme.zero_line_color
        } else {
            theme.grid_color
        };
        frame = frame.with_line(LinePrimitive::new(x, area.top, x, area.bottom(), 1.0, color));

        let label_y = if x_axis.labels_inside {
            area.bottom() - TICK_LABEL_GAP_PX
        } else {
            area.bottom() + TICK_LABEL_GAP_PX + font
        };
        frame = frame.with_text(TextPrimitive::new(
            (x_axis.format)(tick),
            x,
            label_y,
            font,
            theme.font_color,
            TextHAlign::Center,
        ));
    }

    for tick in y_axis.ticks() {
        let y = y_axis.scale.domain_to_pixel(tick, area.vertical_span())?;
        let color = if tick == 0.0 {
            theme.zero_line_color
        } else {
            theme.grid_color
        };
        frame = frame.with_line(LinePrimitive::new(area.left, y, area.right(), y, 1.0, color));

        let (label_x, align) = if y_axis.labels_inside {
            (area.left + TICK_LABEL_GAP_PX, TextHAlign::Left)
        } else {
            (area.left - TICK_LABEL_GAP_PX, TextHAlign::Right)
        };
        frame = frame.with_text(TextPrimitive::new(
            (y_axis.format)(tick),
            label_x,
            y + font / 3.0,
            font,
            theme.font_color,
            align,
        ));
    }

    let title_font = theme.title_font_size_px;
    if let Some(title) = &x_axis.title {
        let title_y = if x_axis.labels_inside {
            area.bottom() - TICK_LABEL_GAP_PX * 2.0 - font
        } else {
            area.bottom() + TICK_LABEL_GAP_PX * 2.0 + font + title_font
        };
        frame = frame.with_text(TextPrimitive::new(
            title.clone(),
            area.left + area.width / 2.0,
            title_y,
            title_font,
            theme.font_color,
            TextHAlign::Center,
        ));
    }
    if let Some(title) = &y_axis.title {
        let title_x = if y_axis.labels_inside {
            area.left + TICK_LABEL_GAP_PX * 2.0 + title_font
        } else {
            (area.left - TICK_LABEL_GAP_PX * 8.0 - title_font).max(title_font)
        };
        frame = frame.with_text(
            TextPrimitive::new(
                title.clone(),
                title_x,
                area.top + area.height / 2.0,
                title_font,
                theme.font_color,
                TextHAlign::Center,
            )
            .rotated(-90.0),
        );
    }

    Ok(frame)
}

/// Integers print bare; everything else keeps up to two decimals.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

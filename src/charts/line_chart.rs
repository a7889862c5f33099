use std::path::Path;

use chrono::{Days, NaiveDate};

use crate::charts::axes::{AxisSpec, format_number, push_axes};
use crate::charts::style::SERIES_BLUE;
use crate::charts::ChartTheme;
use crate::core::{DataPoint, LinearScale, Margins, PlotArea, project_line_segments, project_point};
use crate::error::DashResult;
use crate::generators::TimeSeries;
use crate::render::{CirclePrimitive, LinePrimitive, RenderFrame};

pub const X_AXIS_TITLE: &str = "date";
pub const Y_AXIS_TITLE: &str = "downloads";
const LINE_WIDTH: f64 = 2.0;
const VALUE_PADDING_RATIO: f64 = 0.06;

/// Downloads over time as a single line series.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub series: TimeSeries,
    pub margins: Margins,
}

impl LineChart {
    #[must_use]
    pub fn new(series: TimeSeries) -> Self {
        Self {
            series,
            margins: Margins::new(80.0, 30.0, 30.0, 70.0),
        }
    }

    /// Series projected to `(x, downloads)`; x is days since the epoch for
    /// calendar dates, else the point index.
    #[must_use]
    pub fn data_points(&self) -> Vec<DataPoint> {
        self.series
            .x_positions()
            .into_iter()
            .zip(self.series.points())
            .map(|(x, point)| DataPoint::new(x, point.downloads))
            .collect()
    }

    pub fn to_frame(&self, theme: &ChartTheme) -> DashResult<RenderFrame> {
        let area = PlotArea::inside(theme.viewport, self.margins)?;
        let frame = RenderFrame::new(theme.viewport).with_background(theme.paper_background);

        let points = self.data_points();
        if points.is_empty() {
            return Ok(frame);
        }

        let x_scale = LinearScale::fit(points.iter().map(|point| point.x), 0.0)?;
        let y_scale = LinearScale::fit(points.iter().map(|point| point.y), VALUE_PADDING_RATIO)?;

        let calendar = self.series.has_calendar_dates();
        let format: fn(f64) -> String = if calendar {
            format_epoch_day
        } else {
            format_number
        };
        let x_axis = AxisSpec::new(x_scale)
            .with_tick_count(5)
            .with_title(X_AXIS_TITLE)
            .with_integer_ticks(calendar)
            .with_format(format);
        let y_axis = AxisSpec::new(y_scale)
            .with_tick_count(6)
            .with_title(Y_AXIS_TITLE);
        let mut frame = push_axes(frame, area, &x_axis, &y_axis, theme)?;

        for segment in project_line_segments(&points, x_scale, y_scale, area)? {
            frame = frame.with_line(LinePrimitive::new(
                segment.x1,
                segment.y1,
                segment.x2,
                segment.y2,
                LINE_WIDTH,
                SERIES_BLUE,
            ));
        }

        // A lone point has no segment; mark it so the chart is not blank.
        if let [only] = points.as_slice() {
            let (cx, cy) = project_point(*only, x_scale, y_scale, area)?;
            frame = frame.with_circle(CirclePrimitive::new(cx, cy, 3.0, SERIES_BLUE, 0.0, SERIES_BLUE));
        }

        Ok(frame)
    }
}

/// Loads the double-encoded downloads file and wraps it in a line chart.
pub fn render_time_series(path: impl AsRef<Path>) -> DashResult<LineChart> {
    Ok(LineChart::new(TimeSeries::load(path)?))
}

fn format_epoch_day(day: f64) -> String {
    let offset = day.round();
    let date = if offset >= 0.0 {
        NaiveDate::default().checked_add_days(Days::new(offset as u64))
    } else {
        NaiveDate::default().checked_sub_days(Days::new((-offset) as u64))
    };
    date.map_or_else(|| day.to_string(), |date| date.format("%b %-d, %Y").to_string())
}

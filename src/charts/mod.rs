//! Chart figures built on top of the generators, plus the payloads the page
//! displays.

pub mod axes;
pub mod image_chart;
pub mod line_chart;
pub mod scatter_chart;
pub mod style;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::DashError;

pub use axes::{AxisSpec, format_number, push_axes};
pub use image_chart::ImageChart;
pub use line_chart::{LineChart, render_time_series};
pub use scatter_chart::{ScatterChart, render_frame};
pub use style::ChartTheme;

/// The three chart regions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartId {
    Image,
    Scatter,
    Line,
}

impl ChartId {
    pub const ALL: [Self; 3] = [Self::Image, Self::Scatter, Self::Line];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Scatter => "scatter",
            Self::Line => "line",
        }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartId {
    type Err = DashError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == value)
            .ok_or_else(|| DashError::UnknownChart(value.to_owned()))
    }
}

/// Encoded chart content as served to the page.
///
/// `revision` increases every time the chart is replaced; the body is shared
/// so readers can hold it after the lock is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPayload {
    pub chart: ChartId,
    pub revision: u64,
    pub content_type: &'static str,
    pub body: Arc<[u8]>,
}

impl ChartPayload {
    pub const SVG: &'static str = "image/svg+xml";
    pub const PNG: &'static str = "image/png";

    #[must_use]
    pub fn svg(chart: ChartId, revision: u64, document: String) -> Self {
        Self {
            chart,
            revision,
            content_type: Self::SVG,
            body: Arc::from(document.into_bytes()),
        }
    }

    #[must_use]
    pub fn png(chart: ChartId, revision: u64, bytes: Vec<u8>) -> Self {
        Self {
            chart,
            revision,
            content_type: Self::PNG,
            body: Arc::from(bytes),
        }
    }
}

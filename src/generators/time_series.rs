use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DashError, DashResult, DecodeLayer};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub downloads: f64,
}

impl TimeSeriesPoint {
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

/// Payload behind the second decode of the data file.
#[derive(Debug, Deserialize)]
struct DownloadsDocument {
    data: Vec<TimeSeriesPoint>,
}

/// Downloads-over-time series, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    /// Orders `points` chronologically when every date parses as `YYYY-MM-DD`;
    /// otherwise the input order is kept as-is. The sort is stable.
    #[must_use]
    pub fn new(points: Vec<TimeSeriesPoint>) -> Self {
        let mut points = points;
        if points.iter().all(|point| point.parsed_date().is_some()) {
            points.sort_by_key(TimeSeriesPoint::parsed_date);
        } else {
            warn!(
                count = points.len(),
                "time series has non-ISO dates; keeping file order"
            );
        }
        Self { points }
    }

    /// Reads a double-encoded document: the file holds a JSON string whose
    /// content is itself the JSON object carrying `data`.
    pub fn load(path: impl AsRef<Path>) -> DashResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DashError::DataFile {
            path: path.to_path_buf(),
            source,
        })?;

        let inner: String =
            serde_json::from_str(&text).map_err(|source| DashError::DataEncoding {
                path: path.to_path_buf(),
                layer: DecodeLayer::Outer,
                source,
            })?;
        let document: DownloadsDocument =
            serde_json::from_str(&inner).map_err(|source| DashError::DataEncoding {
                path: path.to_path_buf(),
                layer: DecodeLayer::Inner,
                source,
            })?;

        debug!(
            path = %path.display(),
            points = document.data.len(),
            "loaded downloads time series"
        );
        Ok(Self::new(document.data))
    }

    #[must_use]
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Horizontal positions: days since the Unix epoch when every date parses,
    /// else the point index.
    #[must_use]
    pub fn x_positions(&self) -> Vec<f64> {
        let parsed: Option<Vec<NaiveDate>> =
            self.points.iter().map(TimeSeriesPoint::parsed_date).collect();
        match parsed {
            Some(dates) => dates
                .into_iter()
                .map(|date| date.signed_duration_since(NaiveDate::default()).num_days() as f64)
                .collect(),
            None => (0..self.points.len()).map(|index| index as f64).collect(),
        }
    }

    #[must_use]
    pub fn has_calendar_dates(&self) -> bool {
        !self.points.is_empty() && self.points.iter().all(|point| point.parsed_date().is_some())
    }
}

use serde::Serialize;

use crate::charts::{ChartId, ChartPayload};
use crate::generators::ImageParameters;

/// Slider values plus the payload currently shown in each chart region.
///
/// Only the dispatch path writes here, and every write replaces exactly one
/// chart.
#[derive(Debug, Clone)]
pub struct UiState {
    pub sliders: ImageParameters,
    image: Option<ChartPayload>,
    scatter: ChartPayload,
    line: ChartPayload,
    last_revision: u64,
}

impl UiState {
    /// Starts with the scatter and line charts already rendered; the image
    /// appears with the first slider dispatch.
    #[must_use]
    pub fn new(sliders: ImageParameters, scatter_svg: String, line_svg: String) -> Self {
        Self {
            sliders,
            image: None,
            scatter: ChartPayload::svg(ChartId::Scatter, 1, scatter_svg),
            line: ChartPayload::svg(ChartId::Line, 2, line_svg),
            last_revision: 2,
        }
    }

    #[must_use]
    pub fn payload(&self, chart: ChartId) -> Option<&ChartPayload> {
        match chart {
            ChartId::Image => self.image.as_ref(),
            ChartId::Scatter => Some(&self.scatter),
            ChartId::Line => Some(&self.line),
        }
    }

    #[must_use]
    pub fn revision(&self, chart: ChartId) -> Option<u64> {
        self.payload(chart).map(|payload| payload.revision)
    }

    pub(crate) fn replace_svg(&mut self, chart: ChartId, document: String) -> u64 {
        let revision = self.bump();
        self.store(ChartPayload::svg(chart, revision, document));
        revision
    }

    pub(crate) fn replace_png(&mut self, chart: ChartId, bytes: Vec<u8>) -> u64 {
        let revision = self.bump();
        self.store(ChartPayload::png(chart, revision, bytes));
        revision
    }

    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            big_font_size: self.sliders.big_font_size,
            small_font_size: self.sliders.small_font_size,
            charts: ChartId::ALL
                .into_iter()
                .map(|chart| ChartRevision {
                    chart,
                    revision: self.revision(chart),
                })
                .collect(),
        }
    }

    fn bump(&mut self) -> u64 {
        self.last_revision += 1;
        self.last_revision
    }

    fn store(&mut self, payload: ChartPayload) {
        match payload.chart {
            ChartId::Image => self.image = Some(payload),
            ChartId::Scatter => self.scatter = payload,
            ChartId::Line => self.line = payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRevision {
    pub chart: ChartId,
    pub revision: Option<u64>,
}

/// Serializable view of `UiState` for the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    pub big_font_size: u32,
    pub small_font_size: u32,
    pub charts: Vec<ChartRevision>,
}

#[cfg(test)]
mod tests {
    use super::UiState;
    use crate::charts::ChartId;
    use crate::generators::ImageParameters;

    #[test]
    fn replacing_one_chart_leaves_the_others_untouched() {
        let mut state = UiState::new(
            ImageParameters::default(),
            "<svg>scatter</svg>".to_owned(),
            "<svg>line</svg>".to_owned(),
        );
        let scatter_before = state.payload(ChartId::Scatter).cloned();
        let line_before = state.payload(ChartId::Line).cloned();
        assert!(state.payload(ChartId::Image).is_none());

        let revision = state.replace_png(ChartId::Image, vec![1, 2, 3]);

        assert_eq!(state.revision(ChartId::Image), Some(revision));
        assert_eq!(state.payload(ChartId::Scatter).cloned(), scatter_before);
        assert_eq!(state.payload(ChartId::Line).cloned(), line_before);
    }

    #[test]
    fn revisions_increase_across_charts() {
        let mut state = UiState::new(ImageParameters::default(), String::new(), String::new());
        let first = state.replace_svg(ChartId::Scatter, "a".to_owned());
        let second = state.replace_png(ChartId::Image, Vec::new());
        assert!(second > first);
        assert!(first > state.revision(ChartId::Line).expect("line revision"));
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::charts::ChartId;
use crate::config::DashboardConfig;
use crate::dashboard::{Generators, UiState};
use crate::error::{DashError, DashResult};
use crate::generators::ImageParameters;

/// Id of the fixed-interval timer that drives the confetti refresh.
pub const INTERVAL_SOURCE: &str = "interval-component";

/// One input stimulus: a slider moved to `value`, or a timer tick where
/// `value` is the tick count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashEvent {
    pub source: String,
    #[serde(default)]
    pub value: Option<i64>,
}

impl DashEvent {
    #[must_use]
    pub fn slider(source: impl Into<String>, value: i64) -> Self {
        Self {
            source: source.into(),
            value: Some(value),
        }
    }

    #[must_use]
    pub fn tick(n_intervals: u64) -> Self {
        Self {
            source: INTERVAL_SOURCE.to_owned(),
            value: Some(n_intervals as i64),
        }
    }
}

/// Which kind of control an event source is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    BigFontSlider,
    SmallFontSlider,
    Interval,
}

pub type Handler = fn(&mut UiState, &mut Generators, &DashEvent) -> DashResult<()>;

/// Binding of one event source to the chart it regenerates.
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub kind: InputKind,
    pub output: ChartId,
    pub handler: Handler,
}

/// Event source id → binding, resolved once at startup.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    bindings: IndexMap<String, Binding>,
}

impl DispatchTable {
    /// Both sliders feed the image chart; the timer feeds the scatter chart.
    #[must_use]
    pub fn resolve(config: &DashboardConfig) -> Self {
        let mut bindings = IndexMap::new();
        bindings.insert(
            config.big_slider.id.clone(),
            Binding {
                kind: InputKind::BigFontSlider,
                output: ChartId::Image,
                handler: on_big_font_slider,
            },
        );
        bindings.insert(
            config.small_slider.id.clone(),
            Binding {
                kind: InputKind::SmallFontSlider,
                output: ChartId::Image,
                handler: on_small_font_slider,
            },
        );
        bindings.insert(
            INTERVAL_SOURCE.to_owned(),
            Binding {
                kind: InputKind::Interval,
                output: ChartId::Scatter,
                handler: on_interval_tick,
            },
        );
        Self { bindings }
    }

    pub fn binding(&self, source: &str) -> DashResult<Binding> {
        self.bindings
            .get(source)
            .copied()
            .ok_or_else(|| DashError::UnknownEventSource(source.to_owned()))
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn slider_value(event: &DashEvent) -> DashResult<u32> {
    let value = event
        .value
        .ok_or_else(|| DashError::MissingEventValue(event.source.clone()))?;
    u32::try_from(value).map_err(|_| {
        DashError::InvalidData(format!(
            "slider `{}` value {value} is not a font size",
            event.source
        ))
    })
}

fn on_big_font_slider(
    state: &mut UiState,
    generators: &mut Generators,
    event: &DashEvent,
) -> DashResult<()> {
    let params = ImageParameters {
        big_font_size: slider_value(event)?,
        ..state.sliders
    };
    commit_image(state, generators, params)
}

fn on_small_font_slider(
    state: &mut UiState,
    generators: &mut Generators,
    event: &DashEvent,
) -> DashResult<()> {
    let params = ImageParameters {
        small_font_size: slider_value(event)?,
        ..state.sliders
    };
    commit_image(state, generators, params)
}

/// Renders with the full pair of slider values, not just the one that moved.
/// Sliders and payload are stored together, and only after the render
/// succeeded.
pub(crate) fn commit_image(
    state: &mut UiState,
    generators: &mut Generators,
    params: ImageParameters,
) -> DashResult<()> {
    let png = generators.image_png(params)?;
    state.sliders = params;
    state.replace_png(ChartId::Image, png);
    Ok(())
}

fn on_interval_tick(
    state: &mut UiState,
    generators: &mut Generators,
    _event: &DashEvent,
) -> DashResult<()> {
    let svg = generators.scatter_svg()?;
    state.replace_svg(ChartId::Scatter, svg);
    Ok(())
}

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info};

use crate::charts::{
    ChartId, ChartTheme, ImageChart, LineChart, ScatterChart, render_frame, render_time_series,
};
use crate::config::{DashboardConfig, SliderSpec};
use crate::dashboard::events::{DashEvent, DispatchTable, InputKind, commit_image};
use crate::dashboard::UiState;
use crate::error::{DashError, DashResult};
use crate::generators::{CongratsImageGenerator, ImageParameters, ScatterGenerator};
use crate::render::{Renderer, SvgRenderer};

/// Everything that can regenerate a chart payload.
#[derive(Debug)]
pub struct Generators {
    pub image: CongratsImageGenerator,
    pub scatter: ScatterGenerator,
    pub scatter_point_count: usize,
    pub scatter_theme: ChartTheme,
    svg: SvgRenderer,
}

impl Generators {
    #[must_use]
    pub fn new(
        image: CongratsImageGenerator,
        scatter: ScatterGenerator,
        scatter_point_count: usize,
        scatter_theme: ChartTheme,
    ) -> Self {
        Self {
            image,
            scatter,
            scatter_point_count,
            scatter_theme,
            svg: SvgRenderer::default(),
        }
    }

    pub fn image_png(&self, params: ImageParameters) -> DashResult<Vec<u8>> {
        ImageChart::render(&self.image, params)?.to_png()
    }

    pub fn scatter_svg(&mut self) -> DashResult<String> {
        let chart: ScatterChart = render_frame(&mut self.scatter, self.scatter_point_count);
        let frame = chart.to_frame(&self.scatter_theme)?;
        self.svg.render(&frame)
    }

    pub fn line_svg(&mut self, chart: &LineChart, theme: &ChartTheme) -> DashResult<String> {
        let frame = chart.to_frame(theme)?;
        self.svg.render(&frame)
    }
}

/// Result of one dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartUpdate {
    pub chart: ChartId,
    pub revision: u64,
}

/// The UI shell: owns the state, the generators and the dispatch table.
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    table: DispatchTable,
    generators: Generators,
    state: UiState,
}

pub type SharedDashboard = Arc<Mutex<Dashboard>>;

impl Dashboard {
    /// Loads the data file and the font, renders the scatter and line charts,
    /// then fires the initial slider dispatch. Any failure aborts startup.
    pub fn start(config: DashboardConfig) -> DashResult<Self> {
        let line = render_time_series(&config.data_path)?;
        let image = CongratsImageGenerator::load(&config.font_path)?;
        let mut dashboard = Self::with_parts(config, image, ScatterGenerator::from_entropy(), &line)?;
        dashboard.initial_load()?;
        Ok(dashboard)
    }

    /// Builds the shell from ready parts; the image chart stays empty until
    /// `initial_load` or the first slider event.
    pub fn with_parts(
        config: DashboardConfig,
        image: CongratsImageGenerator,
        scatter: ScatterGenerator,
        line: &LineChart,
    ) -> DashResult<Self> {
        let config = config.validate()?;
        let scatter_theme = ChartTheme::default().with_viewport(config.scatter_viewport);
        let line_theme = ChartTheme::default().with_viewport(config.line_viewport);

        let mut generators =
            Generators::new(image, scatter, config.scatter_point_count, scatter_theme);
        let scatter_svg = generators.scatter_svg()?;
        let line_svg = generators.line_svg(line, &line_theme)?;

        let sliders = ImageParameters::new(config.big_slider.default, config.small_slider.default);
        let state = UiState::new(sliders, scatter_svg, line_svg);
        let table = DispatchTable::resolve(&config);
        info!(
            sources = table.len(),
            points = line.series.len(),
            "dashboard ready"
        );

        Ok(Self {
            config,
            table,
            generators,
            state,
        })
    }

    /// Renders the image from the current slider values, as the page does on
    /// first load.
    pub fn initial_load(&mut self) -> DashResult<ChartUpdate> {
        let params = self.state.sliders;
        commit_image(&mut self.state, &mut self.generators, params)?;
        self.update_for(ChartId::Image)
    }

    /// Runs the handler bound to `event.source` and replaces its chart.
    pub fn dispatch(&mut self, event: &DashEvent) -> DashResult<ChartUpdate> {
        let binding = self.table.binding(&event.source)?;
        (binding.handler)(&mut self.state, &mut self.generators, event)?;
        let update = self.update_for(binding.output)?;
        debug!(
            source = %event.source,
            value = ?event.value,
            chart = %update.chart,
            revision = update.revision,
            "dispatched event"
        );
        Ok(update)
    }

    /// Like `dispatch`, but first holds slider values to the control's
    /// min/max/step the way the page widget would.
    pub fn accept(&mut self, event: &DashEvent) -> DashResult<ChartUpdate> {
        let binding = self.table.binding(&event.source)?;
        if let Some(spec) = self.slider_spec(binding.kind) {
            let value = event
                .value
                .ok_or_else(|| DashError::MissingEventValue(event.source.clone()))?;
            spec.check(value)?;
        }
        self.dispatch(event)
    }

    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn dispatch_table(&self) -> &DispatchTable {
        &self.table
    }

    #[must_use]
    pub fn into_shared(self) -> SharedDashboard {
        Arc::new(Mutex::new(self))
    }

    fn slider_spec(&self, kind: InputKind) -> Option<&SliderSpec> {
        match kind {
            InputKind::BigFontSlider => Some(&self.config.big_slider),
            InputKind::SmallFontSlider => Some(&self.config.small_slider),
            InputKind::Interval => None,
        }
    }

    fn update_for(&self, chart: ChartId) -> DashResult<ChartUpdate> {
        let revision = self.state.revision(chart).ok_or_else(|| {
            DashError::InvalidData(format!("chart `{chart}` has no payload after update"))
        })?;
        Ok(ChartUpdate { chart, revision })
    }
}

/// Locks the shared dashboard; a poisoned lock is reported, not unwrapped.
pub fn lock(dashboard: &SharedDashboard) -> DashResult<MutexGuard<'_, Dashboard>> {
    dashboard.lock().map_err(|_| DashError::StatePoisoned)
}

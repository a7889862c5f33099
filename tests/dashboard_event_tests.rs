use std::path::PathBuf;
use std::sync::Arc;

use congrats_dash::charts::{ChartId, ChartPayload, render_time_series};
use congrats_dash::config::DashboardConfig;
use congrats_dash::dashboard::{DashEvent, Dashboard, INTERVAL_SOURCE, lock};
use congrats_dash::error::DashError;
use congrats_dash::generators::{BlockGlyphRasterizer, CongratsImageGenerator, ScatterGenerator};
use congrats_dash::server::tick_once;

fn test_dashboard() -> Dashboard {
    let line = render_time_series(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/time_series/two_points_double.json"),
    )
    .expect("fixture");
    Dashboard::with_parts(
        DashboardConfig::default(),
        CongratsImageGenerator::new(Arc::new(BlockGlyphRasterizer)),
        ScatterGenerator::seeded(2024),
        &line,
    )
    .expect("dashboard")
}

fn payload(dashboard: &Dashboard, chart: ChartId) -> Option<ChartPayload> {
    dashboard.state().payload(chart).cloned()
}

#[test]
fn scatter_and_line_exist_before_any_event() {
    let dashboard = test_dashboard();

    assert!(payload(&dashboard, ChartId::Image).is_none());
    let scatter = payload(&dashboard, ChartId::Scatter).expect("scatter");
    let line = payload(&dashboard, ChartId::Line).expect("line");
    assert_eq!(scatter.content_type, ChartPayload::SVG);
    assert_eq!(line.content_type, ChartPayload::SVG);
    assert!(std::str::from_utf8(&line.body).expect("utf8").starts_with("<svg"));

    assert_eq!(dashboard.state().sliders.big_font_size, 600);
    assert_eq!(dashboard.state().sliders.small_font_size, 80);
}

#[test]
fn initial_load_renders_the_image_from_default_sliders() {
    let mut dashboard = test_dashboard();
    let update = dashboard.initial_load().expect("initial load");

    assert_eq!(update.chart, ChartId::Image);
    let image = payload(&dashboard, ChartId::Image).expect("image");
    assert_eq!(image.revision, update.revision);
    assert_eq!(image.content_type, ChartPayload::PNG);
    assert_eq!(&image.body[..4], b"\x89PNG");
}

#[test]
fn slider_change_replaces_only_the_image() {
    let mut dashboard = test_dashboard();
    dashboard.initial_load().expect("initial load");
    let image_before = payload(&dashboard, ChartId::Image).expect("image");
    let scatter_before = payload(&dashboard, ChartId::Scatter).expect("scatter");
    let line_before = payload(&dashboard, ChartId::Line).expect("line");

    let update = dashboard
        .dispatch(&DashEvent::slider("size-big", 300))
        .expect("dispatch");

    assert_eq!(update.chart, ChartId::Image);
    let image_after = payload(&dashboard, ChartId::Image).expect("image");
    assert!(image_after.revision > image_before.revision);
    assert_ne!(image_after.body, image_before.body);
    assert_eq!(payload(&dashboard, ChartId::Scatter), Some(scatter_before));
    assert_eq!(payload(&dashboard, ChartId::Line), Some(line_before));
}

#[test]
fn tick_replaces_only_the_scatter() {
    let mut dashboard = test_dashboard();
    dashboard.initial_load().expect("initial load");
    let image_before = payload(&dashboard, ChartId::Image);
    let scatter_before = payload(&dashboard, ChartId::Scatter).expect("scatter");
    let line_before = payload(&dashboard, ChartId::Line);

    let update = dashboard.dispatch(&DashEvent::tick(1)).expect("tick");

    assert_eq!(update.chart, ChartId::Scatter);
    let scatter_after = payload(&dashboard, ChartId::Scatter).expect("scatter");
    assert!(scatter_after.revision > scatter_before.revision);
    assert_ne!(scatter_after.body, scatter_before.body);
    assert_eq!(payload(&dashboard, ChartId::Image), image_before);
    assert_eq!(payload(&dashboard, ChartId::Line), line_before);
}

#[test]
fn image_uses_the_current_pair_of_slider_values() {
    let mut dashboard = test_dashboard();
    dashboard
        .dispatch(&DashEvent::slider("size-small", 150))
        .expect("small");
    dashboard
        .dispatch(&DashEvent::slider("size-big", 200))
        .expect("big");

    let sliders = dashboard.state().sliders;
    assert_eq!(sliders.big_font_size, 200);
    assert_eq!(sliders.small_font_size, 150);

    let mut reference = test_dashboard();
    reference
        .dispatch(&DashEvent::slider("size-big", 200))
        .expect("big");
    reference
        .dispatch(&DashEvent::slider("size-small", 150))
        .expect("small");
    assert_eq!(
        payload(&dashboard, ChartId::Image).expect("image").body,
        payload(&reference, ChartId::Image).expect("image").body
    );
}

#[test]
fn dispatch_table_binds_three_sources_in_page_order() {
    let dashboard = test_dashboard();
    let sources: Vec<&str> = dashboard.dispatch_table().sources().collect();
    assert_eq!(sources, vec!["size-big", "size-small", INTERVAL_SOURCE]);

    let table = dashboard.dispatch_table();
    assert_eq!(table.binding("size-big").expect("big").output, ChartId::Image);
    assert_eq!(table.binding("size-small").expect("small").output, ChartId::Image);
    assert_eq!(
        table.binding(INTERVAL_SOURCE).expect("interval").output,
        ChartId::Scatter
    );
}

#[test]
fn unknown_source_is_rejected_without_side_effects() {
    let mut dashboard = test_dashboard();
    let before = dashboard.state().snapshot();

    let err = dashboard
        .dispatch(&DashEvent::slider("size-medium", 100))
        .expect_err("unknown source");
    assert!(matches!(err, DashError::UnknownEventSource(_)));
    assert_eq!(dashboard.state().snapshot(), before);
}

#[test]
fn accept_holds_sliders_to_their_controls() {
    let mut dashboard = test_dashboard();

    let err = dashboard
        .accept(&DashEvent::slider("size-big", 1_010))
        .expect_err("above max");
    assert!(matches!(err, DashError::SliderOutOfRange { .. }));

    let err = dashboard
        .accept(&DashEvent::slider("size-small", 55))
        .expect_err("off step");
    assert!(matches!(err, DashError::SliderOutOfRange { .. }));

    let err = dashboard
        .accept(&DashEvent {
            source: "size-small".to_owned(),
            value: None,
        })
        .expect_err("no value");
    assert!(matches!(err, DashError::MissingEventValue(_)));

    assert!(payload(&dashboard, ChartId::Image).is_none());
    dashboard
        .accept(&DashEvent::slider("size-small", 200))
        .expect("max is reachable");
    assert!(payload(&dashboard, ChartId::Image).is_some());
}

#[test]
fn ticks_need_no_value() {
    let mut dashboard = test_dashboard();
    let update = dashboard
        .accept(&DashEvent {
            source: INTERVAL_SOURCE.to_owned(),
            value: None,
        })
        .expect("tick");
    assert_eq!(update.chart, ChartId::Scatter);
}

#[test]
fn shared_ticks_advance_the_scatter_revision() {
    let shared = test_dashboard().into_shared();
    let first = tick_once(&shared, 1).expect("first tick");
    let second = tick_once(&shared, 2).expect("second tick");

    assert!(second.revision > first.revision);
    let guard = lock(&shared).expect("lock");
    assert_eq!(guard.state().revision(ChartId::Scatter), Some(second.revision));
}

#[test]
fn snapshot_reports_sliders_and_revisions() {
    let mut dashboard = test_dashboard();
    dashboard
        .dispatch(&DashEvent::slider("size-big", 700))
        .expect("dispatch");

    let snapshot = serde_json::to_value(dashboard.state().snapshot()).expect("json");
    assert_eq!(snapshot["big_font_size"], 700);
    assert_eq!(snapshot["small_font_size"], 80);
    assert_eq!(snapshot["charts"][0]["chart"], "image");
    assert!(snapshot["charts"][0]["revision"].is_u64());
}

#[test]
fn extreme_slider_values_are_rejected_and_the_lock_survives() {
    let shared = test_dashboard().into_shared();

    for value in [i64::MIN, i64::MAX] {
        for source in ["size-big", "size-small"] {
            let err = lock(&shared)
                .expect("lock")
                .accept(&DashEvent::slider(source, value))
                .expect_err("extreme value");
            assert!(matches!(err, DashError::SliderOutOfRange { .. }));
        }
    }

    let guard = lock(&shared).expect("lock is not poisoned");
    assert_eq!(guard.state().sliders.big_font_size, 600);
    drop(guard);
    tick_once(&shared, 1).expect("ticks still dispatch");
}

#[test]
fn failed_render_keeps_sliders_and_image_in_step() {
    let mut dashboard = test_dashboard();
    dashboard.initial_load().expect("initial load");
    let image_before = payload(&dashboard, ChartId::Image).expect("image");

    // `dispatch` skips the control check, so a zero size reaches the renderer.
    let err = dashboard
        .dispatch(&DashEvent::slider("size-big", 0))
        .expect_err("zero font size");
    assert!(matches!(err, DashError::InvalidData(_)));

    assert_eq!(dashboard.state().sliders.big_font_size, 600);
    assert_eq!(payload(&dashboard, ChartId::Image), Some(image_before));
}

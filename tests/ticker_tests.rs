use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use congrats_dash::charts::{ChartId, render_time_series};
use congrats_dash::config::DashboardConfig;
use congrats_dash::dashboard::{Dashboard, SharedDashboard, lock};
use congrats_dash::generators::{BlockGlyphRasterizer, CongratsImageGenerator, ScatterGenerator};
use congrats_dash::server::spawn_ticker;
use tokio::time::sleep;

const PERIOD: Duration = Duration::from_millis(20);

fn shared_dashboard() -> SharedDashboard {
    let line = render_time_series(
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/time_series/two_points_double.json"),
    )
    .expect("fixture");
    let mut dashboard = Dashboard::with_parts(
        DashboardConfig::default(),
        CongratsImageGenerator::new(Arc::new(BlockGlyphRasterizer)),
        ScatterGenerator::seeded(5),
        &line,
    )
    .expect("dashboard");
    dashboard.initial_load().expect("initial load");
    dashboard.into_shared()
}

fn revision(dashboard: &SharedDashboard, chart: ChartId) -> Option<u64> {
    lock(dashboard).expect("lock").state().revision(chart)
}

#[tokio::test(start_paused = true)]
async fn ticker_refreshes_only_the_scatter_once_per_period() {
    let dashboard = shared_dashboard();
    let scatter_start = revision(&dashboard, ChartId::Scatter).expect("scatter");
    let image_start = revision(&dashboard, ChartId::Image);
    let line_start = revision(&dashboard, ChartId::Line);

    let ticker = spawn_ticker(dashboard.clone(), PERIOD);

    // The immediate first tick is skipped.
    sleep(PERIOD / 2).await;
    assert_eq!(revision(&dashboard, ChartId::Scatter), Some(scatter_start));

    sleep(PERIOD).await;
    let after_one = revision(&dashboard, ChartId::Scatter).expect("scatter");
    assert!(after_one > scatter_start);

    sleep(PERIOD * 2).await;
    let after_three = revision(&dashboard, ChartId::Scatter).expect("scatter");
    // Only the scatter is replaced, so the shared counter moves once per tick.
    assert_eq!(after_three, after_one + 2);

    assert_eq!(revision(&dashboard, ChartId::Image), image_start);
    assert_eq!(revision(&dashboard, ChartId::Line), line_start);

    ticker.abort();
    assert!(ticker.await.expect_err("aborted").is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn aborted_ticker_stops_dispatching() {
    let dashboard = shared_dashboard();
    let ticker = spawn_ticker(dashboard.clone(), PERIOD);

    sleep(PERIOD + PERIOD / 2).await;
    ticker.abort();
    let _ = ticker.await;
    let stopped_at = revision(&dashboard, ChartId::Scatter);

    sleep(PERIOD * 5).await;
    assert_eq!(revision(&dashboard, ChartId::Scatter), stopped_at);
}

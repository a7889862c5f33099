//! HTTP serving: routes, page template and the refresh timer.

mod page;
mod routes;
mod ticker;

use std::future::Future;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;

use crate::dashboard::{SharedDashboard, lock};
use crate::error::DashResult;

pub use page::render_page;
pub use routes::router;
pub use ticker::{spawn_ticker, tick_once};

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(dashboard: SharedDashboard) -> DashResult<()> {
    let bind_address = lock(&dashboard)?.config().bind_address.clone();
    let listener = TcpListener::bind(&bind_address).await?;
    serve_on(listener, dashboard, shutdown_signal()).await
}

/// Serves on an already-bound listener until `shutdown` resolves.
pub async fn serve_on(
    listener: TcpListener,
    dashboard: SharedDashboard,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> DashResult<()> {
    let (page, period) = {
        let guard = lock(&dashboard)?;
        (
            render_page(guard.config()),
            Duration::from_millis(guard.config().tick_interval_ms),
        )
    };

    let ticker = spawn_ticker(dashboard.clone(), period);
    info!(address = %listener.local_addr()?, "serving dashboard");

    let result = axum::serve(listener, router(dashboard, page))
        .with_graceful_shutdown(shutdown)
        .await;
    ticker.abort();
    result?;

    info!("dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

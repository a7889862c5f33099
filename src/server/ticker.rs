use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, warn};

use crate::dashboard::{ChartUpdate, DashEvent, SharedDashboard, lock};
use crate::error::{DashError, DashResult};

/// Spawns the fixed-period timer that dispatches `interval-component` ticks.
///
/// The first tick is skipped: the scatter chart is already rendered at
/// startup. Late ticks are delayed rather than bursted.
pub fn spawn_ticker(dashboard: SharedDashboard, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer.tick().await;

        let mut n_intervals: u64 = 0;
        loop {
            timer.tick().await;
            n_intervals += 1;

            // The lock may be held by a card render; wait for it off the workers.
            let shared = dashboard.clone();
            let dispatched =
                tokio::task::spawn_blocking(move || tick_once(&shared, n_intervals)).await;
            match dispatched {
                Ok(Ok(update)) => {
                    debug!(n_intervals, revision = update.revision, "scatter refreshed");
                }
                Ok(Err(DashError::StatePoisoned)) => {
                    error!("dashboard state poisoned; stopping ticker");
                    break;
                }
                Ok(Err(err)) => warn!(n_intervals, error = %err, "tick dispatch failed"),
                Err(err) => {
                    error!(n_intervals, error = %err, "tick task failed; stopping ticker");
                    break;
                }
            }
        }
    })
}

/// Dispatches one tick synchronously. Blocks on the dashboard lock.
pub fn tick_once(dashboard: &SharedDashboard, n_intervals: u64) -> DashResult<ChartUpdate> {
    let mut guard = lock(dashboard)?;
    guard.dispatch(&DashEvent::tick(n_intervals))
}

use std::path::PathBuf;
use std::process::ExitCode;

use congrats_dash::{Dashboard, DashboardConfig, DashResult, server, telemetry};
use tracing::error;

fn main() -> ExitCode {
    let _ = telemetry::init_default_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "dashboard failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Optional single positional argument: path to a JSON config file.
fn run() -> DashResult<()> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };

    let dashboard = Dashboard::start(config)?.into_shared();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(dashboard))
}

//! Tracing setup for the dashboard binary and embedding hosts.
//!
//! Nothing is installed implicitly: call `init_default_tracing` or wire your
//! own `tracing` subscriber.

/// Filter used when `RUST_LOG` is unset. Per-tick dispatch logs sit at
/// `debug`, so the default keeps them quiet.
pub const DEFAULT_DIRECTIVES: &str = "info,hyper=warn,axum=warn";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_DIRECTIVES`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_DIRECTIVES)
}

#[must_use]
pub fn init_tracing(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directives));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}

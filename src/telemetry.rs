//! Tracing setup for hosts embedding `chart-xaxis`.
//!
//! Axis passes log skipped steps at `trace` and frame summaries at `debug`.
//! Hosts that already install a subscriber can ignore this module.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`
/// (default `warn`) when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

//! Telemetry initialisation for the listener.
//!
//! The listener runs standalone, so the setup is deliberately light:
//! structured JSON logs to stdout, no export pipeline. Per-error-event
//! diagnostics are the only operator-visible surface.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured `log_level` when set.
///
/// # Errors
///
/// Returns an error if a subscriber has already been installed.
pub fn init(log_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tls-listener tracing subscriber: {e}"))
}

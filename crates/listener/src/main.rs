//! `tls-listener` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Wire the OS termination signal to a cancellation token.
//! 4. Run the TCP accept loop, terminating TLS on each connection.
//!
//! Exit codes: 0 after a signal-triggered shutdown (in-flight sessions are
//! abandoned, not drained); non-zero on invalid configuration or a bind
//! failure.

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;

use tls_listener::config::Config;
use tls_listener::{accept, shutdown, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: tls-listener configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %cfg.bind_addr(),
        "tls-listener starting"
    );

    // -----------------------------------------------------------------------
    // 3. Shutdown wiring
    // -----------------------------------------------------------------------
    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        shutdown::signal().await;
        info!("shutdown signal received, stopping listener");
        signal_token.cancel();
    });

    // -----------------------------------------------------------------------
    // 4. Accept loop
    // -----------------------------------------------------------------------
    accept::run(&cfg, token).await?;

    info!("tls-listener stopped");
    Ok(())
}

//! TCP accept loop and per-session dispatch.
//!
//! For each incoming connection the listener:
//! 1. Waits for a free session slot (bounded concurrency).
//! 2. Accepts the connection and spawns a Tokio task that terminates TLS
//!    and runs the session; sessions share no mutable state.
//! 3. Returns the slot when the task finishes.
//!
//! The loop runs until the shutdown token is cancelled. In-flight sessions
//! are not drained on shutdown; they end when the process exits.

use std::sync::Arc;

use common::ListenerError;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::{session, tls};

/// Accept loop: listen on the configured address and serve each connection
/// on its own task.
///
/// Transient accept failures are logged and skipped; the connection
/// sequence never terminates on them. Returns `Ok(())` once `shutdown` is
/// cancelled.
///
/// # Errors
///
/// Returns [`ListenerError::Bind`] if the TCP listener cannot be bound;
/// that is the only fatal outcome.
pub async fn run(cfg: &Config, shutdown: CancellationToken) -> Result<(), ListenerError> {
    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ListenerError::Bind {
            addr: addr.clone(),
            source: e,
        })?;
    info!(%addr, max_sessions = cfg.max_sessions, "tls-listener listening");

    let slots = Arc::new(Semaphore::new(cfg.max_sessions));

    loop {
        // A free slot gates the next accept; excess connections queue in
        // the kernel listen backlog until a session finishes.
        let slot = tokio::select! {
            biased;

            () = shutdown.cancelled() => break,

            permit = slots.clone().acquire_owned() => {
                permit.expect("session semaphore is never closed")
            }
        };

        let (stream, peer_addr) = tokio::select! {
            biased;

            () = shutdown.cancelled() => break,

            res = listener.accept() => match res {
                Ok(conn) => conn,
                Err(e) => {
                    let e = ListenerError::Accept(e);
                    warn!(error = %e, "transient accept failure, continuing");
                    continue;
                }
            }
        };

        debug!(%peer_addr, "accepted TCP connection");
        let cert_path = cfg.tls_cert_path.clone();
        let key_path = cfg.tls_key_path.clone();
        tokio::spawn(async move {
            let _slot = slot;
            match tls::terminate(stream, &cert_path, &key_path).await {
                Ok(secure) => {
                    if let Err(e) = session::serve(secure, peer_addr).await {
                        warn!(%peer_addr, error = %e, "session aborted");
                    }
                }
                // The raw socket closed with the failed handshake; nothing
                // was served.
                Err(e) => warn!(%peer_addr, error = %e, "TLS termination failed"),
            }
        });
    }

    info!("listener stopped accepting connections");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(port: u16) -> Config {
        Config {
            bind_address: "127.0.0.1".into(),
            bind_port: port,
            tls_cert_path: "cert.pem".into(),
            tls_key_path: "key.pem".into(),
            max_sessions: 4,
            log_level: "info".into(),
        }
    }

    #[tokio::test]
    async fn bind_conflict_is_fatal() {
        let holder = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = holder.local_addr().unwrap().port();

        let err = run(&test_config(port), CancellationToken::new())
            .await
            .expect_err("second bind of the same port must fail");
        assert!(err.is_fatal());
        assert!(matches!(err, ListenerError::Bind { .. }));
    }

    #[tokio::test]
    async fn cancelled_token_stops_the_loop() {
        let token = CancellationToken::new();
        token.cancel();

        // Port 0 binds an ephemeral port; the loop must observe the
        // already-cancelled token and return before accepting anything.
        run(&test_config(0), token).await.expect("clean stop");
    }
}

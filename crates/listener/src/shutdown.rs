//! Process termination signal.

/// Resolves on the first SIGINT (Ctrl-C) or SIGTERM the process receives.
///
/// SIGTERM is what service managers and orchestrators send on termination;
/// SIGINT covers interactive runs. On non-Unix platforms only Ctrl-C is
/// available and the SIGTERM arm never resolves.
pub async fn signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}

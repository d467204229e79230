use tokio::signal;

/// Resolves on Ctrl+C (or SIGTERM on unix) so axum can drain in-flight requests.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("unable to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("unable to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            #[cfg(not(windows))]
            println!();
            tracing::info!("Ctrl+C received, shutting down.");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, shutting down.");
        }
    }
}

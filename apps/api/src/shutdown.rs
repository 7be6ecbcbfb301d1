//! Graceful shutdown trigger for the HTTP server.

use std::fmt::Display;
use std::future::Future;

/// Resolves on Ctrl+C or SIGTERM
///
/// A handler that cannot be installed never fires; the other one still
/// can.
pub async fn shutdown_signal() {
    let ctrl_c = until_signal("Ctrl+C", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Waits for `signal`; if it fails, logs and waits forever instead
async fn until_signal<F, E>(name: &str, signal: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, signal = name, "failed to install signal handler");
        std::future::pending::<()>().await;
    }
}

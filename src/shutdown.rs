use std::future::Future;
use std::time::Duration;

use tokio::signal;

use crate::error::{AppError, Result};

/// Wait for a shutdown signal (SIGINT or SIGTERM).
///
/// If a handler cannot be installed the corresponding branch never resolves.
pub async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, cancelling workflow...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, cancelling workflow...");
        }
    }
}

/// Drive `work` to completion unless `timeout` elapses or `shutdown` resolves
/// first. Returns `None` when interrupted by `shutdown`.
pub async fn run_until<T, W, S>(work: W, timeout: Duration, shutdown: S) -> Result<Option<T>>
where
    W: Future<Output = T>,
    S: Future<Output = ()>,
{
    tokio::select! {
        res = tokio::time::timeout(timeout, work) => {
            res.map(Some).map_err(|_| AppError::Timeout(timeout.as_secs()))
        }
        _ = shutdown => Ok(None),
    }
}

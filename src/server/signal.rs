// Signal handling module
//
// Supported signals:
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGTERM: Graceful shutdown (Unix only)

use crate::logger;

/// Resolve once the process is asked to stop.
///
/// If a handler cannot be registered the corresponding branch never
/// resolves, so the server keeps running rather than exiting at once.
#[allow(clippy::ignored_unit_patterns)]
pub async fn shutdown_signal() {
    tokio::select! {
        _ = interrupt() => {},
        _ = terminate() => {},
    }
}

async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger::log_error(&format!("Failed to register SIGINT handler: {e}"));
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
            std::future::pending::<()>().await;
        }
    }
}

/// Non-Unix fallback - only Ctrl+C is supported
#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

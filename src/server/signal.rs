// Signal handling module
//
// - SIGINT  (Ctrl+C): stop
// - SIGTERM:          stop
//
// There is no drain phase: the accept loop returns and in-flight
// connections go down with the runtime.

use crate::logger;

/// Resolves with the name of the first stop signal received
#[cfg(unix)]
pub async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                () = ctrl_c() => "SIGINT (Ctrl+C)",
                _ = sigterm.recv() => "SIGTERM",
            }
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
            ctrl_c().await;
            "SIGINT (Ctrl+C)"
        }
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() -> &'static str {
    ctrl_c().await;
    "Ctrl+C"
}

/// Ctrl+C, or never if the handler can't be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger::log_warning(&format!("Failed to listen for Ctrl+C: {e}"));
        std::future::pending::<()>().await;
    }
}

// Server loop module
// Accepts connections until a stop signal arrives

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use super::signal::shutdown_signal;
use crate::config::AppState;
use crate::logger;

/// Serve until SIGINT/SIGTERM
pub async fn run(listener: TcpListener, state: Arc<AppState>) {
    run_until(listener, state, shutdown_signal()).await;
}

/// Serve until `shutdown` resolves. The listener is closed on return.
pub async fn run_until<S>(listener: TcpListener, state: Arc<AppState>, shutdown: S)
where
    S: Future<Output = &'static str>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            reason = &mut shutdown => {
                logger::log_shutdown(reason);
                break;
            }
        }
    }
}

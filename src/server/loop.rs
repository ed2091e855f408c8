// Server loop module
// Sequential accept loop with coarse shutdown

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::serve_connection;
use crate::config;
use crate::logger;

/// Accept and serve connections one at a time until `shutdown` resolves.
///
/// Each connection is served to completion before the next accept, so a
/// shutdown signal takes effect between connections, never mid-response.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop<S>(listener: TcpListener, state: Arc<config::AppState>, shutdown: S)
where
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _peer_addr)) => {
                        serve_connection(stream, Arc::clone(&state)).await;
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = &mut shutdown => break,
        }
    }
}

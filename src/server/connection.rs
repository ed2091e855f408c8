// Connection handling module
// Serves a single TCP connection

use std::sync::Arc;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config;
use crate::handler;
use crate::logger;

/// Serve one connection to completion.
///
/// Keep-alive is disabled, so the connection closes after a single
/// response and the accept loop can move on to the next client. Errors
/// are logged; they never stop the server.
pub async fn serve_connection(stream: tokio::net::TcpStream, state: Arc<config::AppState>) {
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(false);

    let conn = builder.serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&state))),
    );

    if let Err(err) = conn.await {
        logger::log_connection_error(&err);
    }
}

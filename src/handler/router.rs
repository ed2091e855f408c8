//! Request dispatch module
//!
//! Entry point for HTTP request processing: method dispatch, CORS
//! decoration and the per-request access log line.

use crate::config::AppState;
use crate::handler::{cors, static_files};
use crate::http;
use crate::logger::AccessLogEntry;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, SERVER};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let mut entry = AccessLogEntry::new(
        req.method().to_string(),
        req.uri().to_string(),
        req.version(),
    );

    let method = req.method().clone();
    let ctx = build_context(&req);

    let response = cors::with_cors(dispatch(&method, &ctx, &state)).await;

    entry.status = response.status().as_u16();
    state.access_log.log(&entry);
    Ok(response)
}

/// Pick the responder for the method
async fn dispatch(
    method: &Method,
    ctx: &static_files::RequestContext,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let mut response = match *method {
        // Preflight never touches the filesystem
        Method::OPTIONS => http::build_options_response(),
        Method::GET | Method::HEAD => {
            static_files::serve(
                ctx,
                &state.config.server.root_dir,
                &state.config.http.index_files,
            )
            .await
        }
        _ => http::build_501_response(method.as_str()),
    };

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }
    response
}

/// Extract what the file responder needs from the request head
fn build_context<B>(req: &Request<B>) -> static_files::RequestContext {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    static_files::RequestContext {
        path: req.uri().path().to_string(),
        query: req.uri().query().map(ToString::to_string),
        is_head: req.method() == Method::HEAD,
        if_modified_since: header("if-modified-since"),
        has_if_none_match: req.headers().contains_key("if-none-match"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logger::AccessLog;
    use http_body_util::BodyExt;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryLog(Mutex<Vec<AccessLogEntry>>);

    impl AccessLog for MemoryLog {
        fn log(&self, entry: &AccessLogEntry) {
            self.0.lock().unwrap().push(entry.clone());
        }
    }

    fn create_state(root: &std::path::Path) -> (Arc<AppState>, Arc<MemoryLog>) {
        let cfg = Config::load(Some(9000), root).unwrap();
        let log = Arc::new(MemoryLog::default());
        let state = AppState::with_access_log(&cfg, Arc::clone(&log) as Arc<dyn AccessLog>);
        (Arc::new(state), log)
    }

    fn request(method: &str, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    fn assert_cors(response: &Response<Full<Bytes>>) {
        for (name, value) in cors::CORS_HEADERS {
            assert_eq!(response.headers()[name], value, "header {name}");
        }
    }

    #[tokio::test]
    async fn test_options_skips_filesystem() {
        // Root does not exist, OPTIONS must still succeed
        let (state, log) = create_state(std::path::Path::new("/nonexistent/root"));
        let response = handle_request(request("OPTIONS", "/demo.html"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_cors(&response);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
        assert_eq!(log.0.lock().unwrap()[0].status, 200);
    }

    #[tokio::test]
    async fn test_get_file_and_missing() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("demo.html"), "<p>hi</p>").unwrap();
        let (state, log) = create_state(tmp.path());

        let response = handle_request(request("GET", "/demo.html"), Arc::clone(&state))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_cors(&response);
        assert!(response.headers()["server"]
            .to_str()
            .unwrap()
            .starts_with("cors-devserver/"));

        let response = handle_request(request("GET", "/missing.html"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
        assert_cors(&response);

        let entries = log.0.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].request_line(), "GET /demo.html HTTP/1.1");
        assert_eq!(entries[1].status, 404);
    }

    #[tokio::test]
    async fn test_post_is_not_implemented() {
        let tmp = tempfile::tempdir().unwrap();
        let (state, log) = create_state(tmp.path());
        let response = handle_request(request("POST", "/upload?x=1"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 501);
        assert_cors(&response);

        let entries = log.0.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target, "/upload?x=1");
        assert_eq!(entries[0].status, 501);
    }
}

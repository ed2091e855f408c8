//! HTTP response building module
//!
//! Builders for the status codes the file responder produces. Builder
//! failures are logged and degrade to a bare response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build OPTIONS response (preflight request)
///
/// CORS headers are added afterwards by the decorator, like every other response.
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 501 Not Implemented response for methods the responder does not handle
pub fn build_501_response(method: &str) -> Response<Full<Bytes>> {
    let message = format!("501 Unsupported method ('{method}')");
    Response::builder()
        .status(501)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(message.clone())))
        .unwrap_or_else(|e| {
            log_build_error("501", &e);
            Response::new(Full::new(Bytes::from(message)))
        })
}

/// Build 301 redirect response (directory path without trailing slash)
pub fn build_301_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(301)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(last_modified: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("Last-Modified", last_modified)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response carrying file contents
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    last_modified: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Last-Modified", last_modified)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

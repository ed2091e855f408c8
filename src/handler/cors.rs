//! CORS response decorator
//!
//! Wraps any handler and stamps the permissive cross-origin and no-cache
//! headers onto whatever it returns, errors included.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::Response;
use std::future::Future;

/// Headers added to every response (names must stay lowercase)
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
    ("access-control-allow-headers", "Content-Type"),
    ("cache-control", "no-cache, no-store, must-revalidate"),
];

/// Insert the fixed headers, replacing any value the inner handler set
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

/// Run an inner handler and decorate its response
pub async fn with_cors<F>(inner: F) -> Response<Full<Bytes>>
where
    F: Future<Output = Response<Full<Bytes>>>,
{
    let mut response = inner.await;
    apply_cors_headers(response.headers_mut());
    response
}

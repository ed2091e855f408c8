//! Access log format module
//!
//! One line per completed request:
//! `[17/Oct/2026 14:03:22] "GET /demo.html HTTP/1.1" 200 -`

use chrono::{DateTime, Local};
use hyper::Version;

/// Timestamp layout used inside the leading brackets
const TIME_FORMAT: &str = "%d/%b/%Y %H:%M:%S";

/// Access log entry for a single request/response pair
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Request timestamp (local time)
    pub time: DateTime<Local>,
    /// HTTP method (GET, OPTIONS, ...)
    pub method: String,
    /// Request target as sent by the client, query included
    pub target: String,
    /// Protocol label, e.g. `HTTP/1.1`
    pub http_version: &'static str,
    /// Response status code
    pub status: u16,
}

impl AccessLogEntry {
    /// Create a new entry stamped with the current local time
    pub fn new(method: String, target: String, version: Version) -> Self {
        Self {
            time: Local::now(),
            method,
            target,
            http_version: version_label(version),
            status: 200,
        }
    }

    /// The request line as the client sent it
    pub fn request_line(&self) -> String {
        format!("{} {} {}", self.method, self.target, self.http_version)
    }

    /// Render the log line
    pub fn format(&self) -> String {
        format!(
            "[{}] \"{}\" {} -",
            self.time.format(TIME_FORMAT),
            self.request_line(),
            self.status,
        )
    }
}

/// Protocol label for a hyper version
pub fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/1.1",
    }
}

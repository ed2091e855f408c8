//! Access log sinks
//!
//! The server receives its sink through `AppState`, so the per-request line
//! can be redirected without touching the request path.

use super::format::AccessLogEntry;

/// Receives one entry per completed request
pub trait AccessLog: Send + Sync {
    fn log(&self, entry: &AccessLogEntry);
}

/// Default sink: formatted line on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutAccessLog;

impl AccessLog for StdoutAccessLog {
    fn log(&self, entry: &AccessLogEntry) {
        super::write_info(&entry.format());
    }
}

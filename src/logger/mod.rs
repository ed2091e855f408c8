//! Logger module
//!
//! Console logging for the server:
//! - Startup banner and shutdown farewell
//! - Access logging through an injectable sink
//! - Error and warning logging

mod access;
mod format;

pub use access::{AccessLog, StdoutAccessLog};
pub use format::{version_label, AccessLogEntry};

use crate::config::Config;
use std::net::SocketAddr;

/// Write to stdout
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to stderr
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(config: &Config) {
    for line in banner_lines(config) {
        write_info(&line);
    }
}

/// Startup banner, one entry per printed line
pub fn banner_lines(config: &Config) -> Vec<String> {
    let port = config.server.port;
    vec![
        "🚀 CORS Development Server".to_string(),
        format!("📍 Serving at: http://localhost:{port}"),
        format!("📁 Root directory: {}", config.server.root_dir.display()),
        format!("📄 Demo page: http://localhost:{port}/demo.html"),
        // The root follows the binary, not the working directory
        "🔧 Files are served from the directory holding this binary;".to_string(),
        "   copy it next to demo.html (under `cargo run` that is target/debug/)".to_string(),
        "\n💡 To test the extension:".to_string(),
        "   1. Load the extension in Chrome (chrome://extensions/)".to_string(),
        "   2. Visit the demo page".to_string(),
        "   3. Open the developer panel and find the extension tab".to_string(),
        "\n🛑 Press Ctrl+C to stop the server".to_string(),
    ]
}

pub fn log_server_stopped() {
    write_info("\n👋 Server stopped");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    log_error(&format!("Failed to bind {addr}: {err}"));
}

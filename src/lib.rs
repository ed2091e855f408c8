//! Local development file server.
//!
//! Serves a directory over HTTP with permissive CORS and no-cache headers on
//! every response, so browser extensions and demo pages can fetch from it
//! during manual testing.
//!
//! The document root is the directory containing the executable, not the
//! caller's working directory. Under `cargo run` that is `target/debug/`, so
//! place the binary next to the demo files (or copy them beside it).

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

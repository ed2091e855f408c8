//! Request handler module
//!
//! Dispatches requests to the static file responder and decorates every
//! response with the CORS headers.

pub mod cors;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;

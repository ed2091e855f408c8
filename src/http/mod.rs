//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the handlers: content types, cache
//! validation, directory listings and response builders.

pub mod cache;
pub mod listing;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_301_response, build_304_response, build_404_response, build_501_response,
    build_file_response, build_html_response, build_options_response,
};

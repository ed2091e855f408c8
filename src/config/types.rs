// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub http: HttpConfig,
}

/// Listener and document root
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory every request path is resolved against
    pub root_dir: PathBuf,
}

/// Response-level settings for the file responder
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Value of the `Server` response header
    pub server_name: String,
    /// Files tried, in order, when a directory is requested
    pub index_files: Vec<String>,
}

// Configuration module entry point
// Builds the server configuration from defaults and the command line

mod state;
mod types;

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, ServerConfig};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 12000;

/// Parse the optional positional port argument (program name already skipped)
pub fn parse_port_arg<S: AsRef<str>>(args: &[S]) -> Result<Option<u16>, config::ConfigError> {
    let Some(arg) = args.first() else {
        return Ok(None);
    };
    let arg = arg.as_ref();
    arg.trim()
        .parse::<u16>()
        .map(Some)
        .map_err(|e| config::ConfigError::Message(format!("Invalid port '{arg}': {e}")))
}

/// Directory holding the running executable
///
/// Static files are resolved against this directory rather than the caller's
/// working directory.
pub fn default_root_dir() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("Executable path has no parent: {}", exe.display()),
        )
    })?;
    dir.canonicalize()
}

impl Config {
    /// Assemble configuration from built-in defaults plus the CLI port override.
    /// No configuration file or environment variable is consulted.
    pub fn load(port: Option<u16>, root_dir: &Path) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.root_dir", root_dir.to_string_lossy().into_owned())?
            .set_default(
                "http.server_name",
                format!("cors-devserver/{}", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("http.index_files", vec!["index.html", "index.htm"])?
            .set_override_option("server.port", port.map(i64::from))?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

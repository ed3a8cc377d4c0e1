//! Configuration loading and constants.
//!
//! Loads the sidecar configuration from an optional TOML file and defines the
//! defaults for the bind address, result file location, and logging. Command
//! line flags are applied on top of the loaded file in `main`. `AppConfig` is
//! the root configuration struct and is frozen once the server starts.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;

use const_format::formatcp;
use serde::Deserialize;

// =============================================================================
// HTTP Server Defaults
// =============================================================================

/// Default listening port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default bind address. A bare `:port` binds every interface.
pub const DEFAULT_BIND_ADDR: &str = formatcp!(":{}", DEFAULT_HTTP_PORT);

/// Host substituted when the bind address omits one. Dual-stack where the
/// kernel allows it; the server falls back to IPv4 when IPv6 is unavailable.
pub const WILDCARD_HOST: &str = "[::]";

/// Seconds to wait for in-flight requests on shutdown
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// Result File Defaults
// =============================================================================

/// Default location of the result file
pub const DEFAULT_RESULT_FILE: &str = "/result";

/// Help text for the result file flag
pub const RESULT_FILE_HELP: &str = formatcp!(
    "Location of the result file (default: {}). File should be a single line of the format \
     <status code> SPACE <response>; example: \"500 server is unhealthy\"",
    DEFAULT_RESULT_FILE
);

// =============================================================================
// Logging Defaults
// =============================================================================

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "status_responder=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Result file configuration
    #[serde(default)]
    pub result: ResultFileConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    /// Address to bind, either `host:port` or `:port`
    #[serde(default = "HttpServerConfig::default_bind_addr")]
    pub bind_addr: String,
    /// Drain period for graceful shutdown in seconds
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: Self::default_bind_addr(),
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_bind_addr() -> String {
        DEFAULT_BIND_ADDR.to_string()
    }

    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }
}

/// What to do when the result file cannot be read at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReadErrorPolicy {
    /// Log and terminate the process
    #[default]
    Exit,
    /// Answer 500 and keep serving
    Respond,
}

/// Result file configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ResultFileConfig {
    /// Path of the file written by the health checker
    #[serde(default = "ResultFileConfig::default_path")]
    pub path: String,
    /// Behaviour when the file cannot be read
    #[serde(default)]
    pub on_read_error: ReadErrorPolicy,
}

impl Default for ResultFileConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            on_read_error: ReadErrorPolicy::default(),
        }
    }
}

impl ResultFileConfig {
    fn default_path() -> String {
        DEFAULT_RESULT_FILE.to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.result.path.is_empty() {
            return Err(ConfigError::Validation(
                "result.path must not be empty".to_string(),
            ));
        }

        match self.logging.format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "Unknown logging.format {:?}, expected \"text\" or \"json\"",
                    other
                )))
            }
        }

        Ok(())
    }

    /// Resolve `http.bind_addr` to a socket address.
    ///
    /// Accepts `:8080` (all interfaces, IPv6 and IPv4), `127.0.0.1:8080`, `[::1]:8080`
    /// and resolvable host names such as `localhost:8080`.
    pub fn resolve_bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.http.bind_addr.trim();
        let candidate = if raw.starts_with(':') {
            format!("{}{}", WILDCARD_HOST, raw)
        } else {
            raw.to_string()
        };

        candidate
            .to_socket_addrs()
            .map_err(|e| ConfigError::Validation(format!("Invalid http.bind_addr {:?}: {}", raw, e)))?
            .next()
            .ok_or_else(|| {
                ConfigError::Validation(format!("http.bind_addr {:?} resolved to no address", raw))
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

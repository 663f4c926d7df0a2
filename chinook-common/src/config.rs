//! Configuration loading and store path resolution
//!
//! Settings sources, highest priority first:
//! 1. Command-line arguments (--database, --port)
//! 2. Environment variables (CHINOOK_DB, CHINOOK_INSIGHTS_PORT)
//! 3. TOML configuration file
//! 4. Built-in defaults
//!
//! A missing TOML file never terminates startup; the chain falls through
//! to the built-in defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable naming the store database file
pub const DATABASE_ENV: &str = "CHINOOK_DB";

/// Fallback database path when nothing else is configured
pub const DEFAULT_DATABASE_FILE: &str = "chinook.db";

/// Default HTTP port for chinook-insights
pub const DEFAULT_PORT: u16 = 5730;

/// Bootstrap configuration loaded from the TOML file
///
/// These settings cannot change during runtime; restart to pick up edits.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct TomlConfig {
    /// Path to the store database file (relative or absolute)
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Default configuration file location: `<config_dir>/chinook-insights/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chinook-insights").join("config.toml"))
}

/// Load the TOML configuration from the default location.
///
/// Returns `None` when the file does not exist or cannot be parsed; the
/// caller proceeds with environment variables and built-in defaults.
pub fn load_config_file() -> Option<TomlConfig> {
    let path = config_file_path()?;
    if !path.exists() {
        return None;
    }
    match parse_config_file(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            None
        }
    }
}

/// Parse a specific TOML configuration file.
///
/// Unlike [`load_config_file`], read and parse failures are reported as errors.
pub fn parse_config_file(path: &Path) -> Result<TomlConfig> {
    let raw = std::fs::read_to_string(path)?;
    toml::from_str(&raw)
        .map_err(|e| Error::Config(format!("invalid config file {}: {}", path.display(), e)))
}

/// Resolve the store database path.
///
/// Priority order: command-line argument, then the CHINOOK_DB environment
/// variable, then the config file, then `./chinook.db`.
pub fn resolve_database_path(cli_arg: Option<PathBuf>, file: Option<&TomlConfig>) -> PathBuf {
    if let Some(path) = cli_arg {
        return path;
    }

    if let Ok(path) = std::env::var(DATABASE_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = file.and_then(|f| f.database.clone()) {
        return path;
    }

    PathBuf::from(DEFAULT_DATABASE_FILE)
}

/// Resolve the HTTP port: command line (or its env fallback), then the
/// config file, then [`DEFAULT_PORT`].
pub fn resolve_port(cli_arg: Option<u16>, file: Option<&TomlConfig>) -> u16 {
    cli_arg
        .or_else(|| file.and_then(|f| f.port))
        .unwrap_or(DEFAULT_PORT)
}

//! Bootstrap configuration loading
//!
//! Settings are resolved once at startup, highest priority first:
//! 1. Command-line arguments
//! 2. Environment variables (both handled by the binary's clap parser)
//! 3. TOML config file
//! 4. Compiled defaults
//!
//! A missing TOML file is not an error. A TOML file that exists but does
//! not parse is.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Built-in fallback values
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("Data/artistes.json"),
            host: "127.0.0.1".to_string(),
            port: 5080,
            log_level: default_log_level(),
        }
    }
}

/// Contents of `config.toml`
///
/// Every key is optional; absent keys fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the JSON data file (relative paths resolve against the working directory)
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_file: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl ServiceConfig {
    /// Merge overrides, the optional TOML file and compiled defaults
    pub fn resolve(overrides: ConfigOverrides, toml: Option<TomlConfig>) -> Self {
        let defaults = CompiledDefaults::default();
        let toml = toml.unwrap_or_default();

        Self {
            data_file: overrides
                .data_file
                .or(toml.data_file)
                .unwrap_or(defaults.data_file),
            host: overrides.host.or(toml.host).unwrap_or(defaults.host),
            port: overrides.port.or(toml.port).unwrap_or(defaults.port),
            log_level: toml.logging.level,
        }
    }

    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Platform config file location: `<config_dir>/artistes/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("artistes").join("config.toml"))
}

/// Load the TOML config file
///
/// Uses `explicit` when given, otherwise the platform default location.
/// Returns `Ok(None)` when the file does not exist.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => {
                info!("No platform config directory, using defaults");
                return Ok(None);
            }
        },
    };

    if !path.exists() {
        if explicit.is_some() {
            warn!("Config file {} not found, using defaults", path.display());
        } else {
            info!("No config file at {}, using defaults", path.display());
        }
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    info!("Loaded config file {}", path.display());
    Ok(Some(config))
}

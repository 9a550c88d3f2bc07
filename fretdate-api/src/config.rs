//! Service configuration
//!
//! Resolution order, highest priority first:
//! 1. Command-line flags
//! 2. Environment variables (`FRETDATE_BIND`, `FRETDATE_MAX_BATCH`, `FRETDATE_CONFIG`)
//! 3. TOML config file
//! 4. Compiled defaults
//!
//! A missing or malformed config file never stops startup. Problems are
//! collected as warnings and logged once tracing is up.

use serde::Deserialize;
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_BIND: &str = "FRETDATE_BIND";
pub const ENV_MAX_BATCH: &str = "FRETDATE_MAX_BATCH";
pub const ENV_CONFIG: &str = "FRETDATE_CONFIG";

pub const DEFAULT_PORT: u16 = 5790;
pub const DEFAULT_MAX_BATCH: usize = 100;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Config file loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// `config.toml` contents; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    pub bind_addr: Option<String>,
    pub max_batch: Option<usize>,
    pub log_level: Option<String>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind: Option<SocketAddr>,
    pub max_batch: Option<usize>,
    pub config: Option<PathBuf>,
}

/// Effective service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    /// Upper bound on items in one batch request
    pub max_batch: usize,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            max_batch: DEFAULT_MAX_BATCH,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Outcome of configuration resolution
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: ServiceConfig,
    /// Config file that contributed values, if any
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl ServiceConfig {
    /// Resolve settings from every layer
    pub fn resolve(cli: &CliOverrides) -> ResolvedConfig {
        let mut config = ServiceConfig::default();
        let mut warnings = Vec::new();
        let mut source = None;

        // Priority 3: TOML config file
        match config_file_path(cli.config.as_deref()) {
            Some(path) => match load_toml(&path) {
                Ok(file) => {
                    config.apply_file(&file, &path, &mut warnings);
                    source = Some(path);
                }
                Err(e) => warnings.push(format!("{e}; using defaults")),
            },
            None => warnings.push("Could not determine config directory; using defaults".to_string()),
        }

        // Priority 2: environment
        if let Ok(value) = env::var(ENV_BIND) {
            match value.parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(_) => warnings.push(format!("Ignoring invalid {ENV_BIND} '{value}'")),
            }
        }
        if let Ok(value) = env::var(ENV_MAX_BATCH) {
            match parse_max_batch(&value) {
                Some(n) => config.max_batch = n,
                None => warnings.push(format!("Ignoring invalid {ENV_MAX_BATCH} '{value}' (expected a positive integer)")),
            }
        }

        // Priority 1: command line
        if let Some(addr) = cli.bind {
            config.bind_addr = addr;
        }
        match cli.max_batch {
            Some(0) => warnings.push("Ignoring --max-batch 0 (expected a positive integer)".to_string()),
            Some(n) => config.max_batch = n,
            None => {}
        }

        ResolvedConfig {
            config,
            source,
            warnings,
        }
    }

    fn apply_file(&mut self, file: &TomlConfig, path: &Path, warnings: &mut Vec<String>) {
        if let Some(addr) = &file.bind_addr {
            match addr.parse() {
                Ok(addr) => self.bind_addr = addr,
                Err(_) => warnings.push(format!("Ignoring invalid bind_addr '{addr}' in {}", path.display())),
            }
        }
        match file.max_batch {
            Some(0) => warnings.push(format!("Ignoring max_batch = 0 in {}", path.display())),
            Some(n) => self.max_batch = n,
            None => {}
        }
        if let Some(level) = file.log_level.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            self.log_level = level.to_string();
        }
    }
}

/// `<config_dir>/fretdate/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fretdate").join("config.toml"))
}

fn config_file_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(ENV_CONFIG).map(PathBuf::from))
        .or_else(default_config_path)
}

/// Read and parse a config file
pub fn load_toml(path: &Path) -> Result<TomlConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_max_batch(value: &str) -> Option<usize> {
    value.trim().parse().ok().filter(|&n: &usize| n > 0)
}

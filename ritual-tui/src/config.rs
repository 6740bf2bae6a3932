//! Configuration loading for the TUI.
//!
//! The config file is TOML, found via `--config <path>` or the
//! `RITUAL_CONFIG` environment variable. Backend connection settings live
//! in the `[backend]` table and are validated by `ritual-client`.

use ritual_client::BackendConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV_VAR: &str = "RITUAL_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No config file given (use --config <path> or {CONFIG_ENV_VAR})")]
    MissingConfigPath,

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Backend(#[from] ritual_client::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RitualConfig {
    /// Connection settings for the document backend.
    pub backend: BackendConfig,
    /// Tick interval of the event loop, which also paces the delayed
    /// auth redirect.
    pub refresh_interval_ms: u64,
    /// Diagnostics go to a file; the terminal belongs to the UI.
    pub log_path: PathBuf,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "ember".to_string(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl RitualConfig {
    /// Loads the config from `--config` or the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args()
            .or_else(config_path_from_env)
            .ok_or(ConfigError::MissingConfigPath)?;
        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend.validate()?;
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "refresh_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.theme.name != "ember" {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: format!("unknown theme `{}`", self.theme.name),
            });
        }
        Ok(())
    }
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from)
}

//! Host configuration resolved from the environment.
//!
//! # Responsibility
//! - Collect the few knobs the host needs before loading modules.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - Invalid values are reported, never silently replaced by defaults.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_LOG_LEVEL: &str = "NESTMOD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NESTMOD_LOG_DIR";
pub const ENV_RUN_COMPANION: &str = "NESTMOD_RUN_COMPANION";
pub const ENV_MODULE_DIR: &str = "NESTMOD_MODULE_DIR";

/// Configuration parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key}: {message}")]
    InvalidLogLevel { key: &'static str, message: String },
    #[error("{key}: expected 1|true|yes|on or 0|false|no|off, got `{value}`")]
    InvalidBool { key: &'static str, value: String },
}

/// Host settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub log_level: &'static str,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
    /// Whether companion interpreter commands run after native registration.
    pub companion_commands: bool,
    /// Directory holding standalone module libraries; modules load in-process when unset.
    pub module_dir: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            companion_commands: true,
            module_dir: None,
        }
    }
}

impl HostConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, a key→value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(|message| {
                ConfigError::InvalidLogLevel {
                    key: ENV_LOG_LEVEL,
                    message,
                }
            })?;
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);
        config.module_dir = read(ENV_MODULE_DIR).map(PathBuf::from);
        if let Some(raw) = read(ENV_RUN_COMPANION) {
            config.companion_commands = parse_bool(ENV_RUN_COMPANION, &raw)?;
        }
        Ok(config)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

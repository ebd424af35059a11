//! Global configuration management
//!
//! Reads user settings from `config.toml` in the config directory: the
//! command used to invoke the Angular CLI and output preferences.

use crate::config::defaults::DEFAULT_NG_COMMAND;
use crate::infra::dirs::NglibDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Global configuration error types
#[derive(Error, Debug)]
pub enum GlobalConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: String, error: String },
}

/// Global configuration for nglib
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GlobalConfig {
    /// External command settings
    #[serde(default)]
    pub exec: ExecConfig,

    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

/// External command settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExecConfig {
    /// Command used to invoke the Angular CLI, e.g. `ng` or `npx ng`
    pub ng: Option<String>,
}

/// Output preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Enable colored output
    pub color: Option<bool>,
}

impl GlobalConfig {
    /// Load global configuration from the config directory
    ///
    /// A missing file yields the default configuration.
    pub fn load(dirs: &NglibDirs) -> Result<Self, GlobalConfigError> {
        Self::load_from_path(&dirs.global_config_path())
    }

    /// Load global configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, GlobalConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| GlobalConfigError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| GlobalConfigError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Get the effective Angular CLI command
    #[must_use]
    pub fn ng_command(&self) -> &str {
        self.exec.ng.as_deref().unwrap_or(DEFAULT_NG_COMMAND)
    }

    /// Whether colored output is enabled (default: on)
    #[must_use]
    pub fn color(&self) -> bool {
        self.output.color.unwrap_or(true)
    }
}

//! Censoring run configuration.
//!
//! The engine treats placeholder text as opaque data supplied by
//! configuration; this module is where that data comes from. Everything has
//! a default, so a config file is optional.

use crate::censor::stub::DEFAULT_PLACEHOLDERS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CensorConfig {
    /// Placeholder texts cycled through stubbed bodies, in order.
    #[serde(default = "default_placeholders")]
    pub placeholders: Vec<String>,

    /// Extra marker lines recognized in addition to the built-in set.
    #[serde(default)]
    pub markers: Vec<String>,

    /// File extensions (without the dot) that get censored; everything
    /// else in the copied set is left verbatim.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_placeholders() -> Vec<String> {
    DEFAULT_PLACEHOLDERS.iter().map(|s| s.to_string()).collect()
}

fn default_extensions() -> Vec<String> {
    vec!["java".to_string()]
}

impl Default for CensorConfig {
    fn default() -> Self {
        Self {
            placeholders: default_placeholders(),
            markers: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

impl CensorConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.placeholders.is_empty() {
            return Err(ValidationError::EmptyPlaceholders);
        }
        if self.extensions.is_empty() {
            return Err(ValidationError::EmptyExtensions);
        }
        for ext in &self.extensions {
            if ext.starts_with('.') || ext.is_empty() {
                return Err(ValidationError::BadExtension(ext.clone()));
            }
        }
        // A blank marker would match every empty comment line
        if self.markers.iter().any(|m| m.trim().is_empty()) {
            return Err(ValidationError::BlankMarker);
        }
        Ok(())
    }

    /// True if a comment line is a recognized marker: the built-in set
    /// plus any configured extras.
    pub fn is_marker(&self, text: &str) -> bool {
        let text = text.trim();
        crate::censor::is_marker(text) || self.markers.iter().any(|m| m.trim() == text)
    }

    /// True if a path's extension is in the censored set.
    pub fn censors_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("placeholder list must not be empty")]
    EmptyPlaceholders,

    #[error("extension list must not be empty")]
    EmptyExtensions,

    #[error("extension must be non-empty and written without a dot: {0:?}")]
    BadExtension(String),

    #[error("marker lines must not be blank")]
    BlankMarker,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read censor config from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse censor config TOML: {source}")]
    Toml {
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("invalid censor config: {source}")]
    Validation {
        #[source]
        source: ValidationError,
    },
}

pub fn load_from_str(input: &str) -> Result<CensorConfig, ConfigError> {
    let config: CensorConfig =
        toml_edit::de::from_str(input).map_err(|source| ConfigError::Toml { source })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation { source })?;
    Ok(config)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<CensorConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

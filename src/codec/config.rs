//! Codec Configuration
//!
//! Buffer capacity and serialization policy, loadable from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event, Event};

/// Default document buffer size in bytes
pub const DEFAULT_DOCUMENT_CAPACITY: usize = 512;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document_capacity must be greater than zero")]
    ZeroCapacity,
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Fixed document buffer size in bytes (default: 512)
    #[serde(default = "default_document_capacity")]
    pub document_capacity: usize,

    /// Validate a record against its own schema before rendering it
    /// (default: false)
    #[serde(default)]
    pub validate_on_serialize: bool,

    /// Render indented JSON (default: false)
    #[serde(default)]
    pub pretty: bool,
}

fn default_document_capacity() -> usize {
    DEFAULT_DOCUMENT_CAPACITY
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            document_capacity: default_document_capacity(),
            validate_on_serialize: false,
            pretty: false,
        }
    }
}

impl CodecConfig {
    /// Create a config with the given buffer capacity
    pub fn with_capacity(document_capacity: usize) -> Self {
        Self {
            document_capacity,
            ..Default::default()
        }
    }

    /// Enable validation before serialization
    pub fn validating(self) -> Self {
        Self {
            validate_on_serialize: true,
            ..self
        }
    }

    /// Parse a config from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: CodecConfig = serde_json::from_str(text)?;
        if config.document_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        let capacity = config.document_capacity.to_string();
        let source = path.display().to_string();
        log_event(
            Event::ConfigLoaded,
            &[
                ("document_capacity", capacity.as_str()),
                ("path", source.as_str()),
            ],
        );
        Ok(config)
    }
}

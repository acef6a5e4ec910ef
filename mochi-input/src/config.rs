//! Configuration for grammar construction and matching

use std::path::Path;

use serde::{Deserialize, Serialize};

/// How registration treats keys whose character sets intersect at one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Refuse to register a key that shares characters with a sibling key
    #[default]
    Reject,
    /// Accept it; the sibling registered first wins while matching
    FirstMatchWins,
}

/// Matcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Policy for overlapping keys at the same tree node
    pub overlap: OverlapPolicy,
    /// Maximum number of characters kept in a session's diagnostic input buffer
    pub max_input_len: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            overlap: OverlapPolicy::Reject,
            max_input_len: 4096,
        }
    }
}

impl MatcherConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

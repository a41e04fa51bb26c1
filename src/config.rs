//! File-based configuration.
//!
//! A TOML file with three optional sections:
//!
//! ```toml
//! [token]
//! length = 6
//! charset = "number"
//! shuffle = "fisher-yates"
//!
//! [policy]
//! alpha = true
//! numeric = true
//! minLength = 10
//!
//! [audit]
//! samples = 20000
//! z_score = 4.753
//! ```

use crate::analysis::UniformityThresholds;
use crate::entropy::EntropySource;
use crate::policy::PolicyRules;
use crate::token::{CharsetKind, GenerationRequest, ShuffleStrategy, TokenGenerator};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Token generation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Default token length.
    pub length: usize,
    /// Default alphabet.
    pub charset: CharsetKind,
    /// Permutation strategy.
    pub shuffle: ShuffleStrategy,
}

impl Default for TokenConfig {
    fn default() -> Self {
        let request = GenerationRequest::default();
        Self {
            length: request.length,
            charset: request.charset,
            shuffle: ShuffleStrategy::default(),
        }
    }
}

impl TokenConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.request().map(|_| ())
    }

    /// Builds the default generation request.
    pub fn request(&self) -> Result<GenerationRequest, ConfigError> {
        GenerationRequest::new(self.length, self.charset)
            .map_err(|e| ConfigError::InvalidToken(e.to_string()))
    }

    /// Builds a generator over `entropy` using the configured strategy.
    pub fn generator<E: EntropySource>(&self, entropy: E) -> TokenGenerator<E> {
        TokenGenerator::with_entropy(entropy).with_shuffle(self.shuffle)
    }
}

/// Uniformity audit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Number of single characters to sample.
    pub samples: usize,
    /// Standard-normal quantile of the rejection level.
    pub z_score: f64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            samples: 20_000,
            z_score: UniformityThresholds::default().z_score,
        }
    }
}

impl AuditConfig {
    /// Builds the acceptance thresholds for the audit.
    pub fn thresholds(&self) -> UniformityThresholds {
        UniformityThresholds {
            z_score: self.z_score,
            ..Default::default()
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The file is not valid TOML or has unknown values.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
    /// The `[token]` section describes an invalid request.
    #[error("invalid token settings: {0}")]
    InvalidToken(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Token generation defaults.
    #[serde(default)]
    pub token: TokenConfig,
    /// Policy applied by `validate` when no rule flags are given.
    #[serde(default)]
    pub policy: PolicyRules,
    /// Uniformity audit settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.token.validate()?;
        Ok(config)
    }
}

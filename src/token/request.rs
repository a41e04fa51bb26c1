//! Token generation requests.

use super::{CharsetKind, TokenError};
use serde::{Deserialize, Serialize};

/// Default token length when none is given.
pub const DEFAULT_LENGTH: usize = 8;

/// What to generate: how many characters, and from which alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    /// Number of characters, at least 1.
    pub length: usize,
    /// Alphabet to draw from.
    pub charset: CharsetKind,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            charset: CharsetKind::Mixed,
        }
    }
}

impl GenerationRequest {
    /// Creates a validated request.
    pub fn new(length: usize, charset: CharsetKind) -> Result<Self, TokenError> {
        let request = Self { length, charset };
        request.validate()?;
        Ok(request)
    }

    /// Creates a request of the given length over the default alphabet.
    pub fn with_length(length: usize) -> Result<Self, TokenError> {
        Self::new(length, CharsetKind::default())
    }

    /// Builds a request from host-supplied values: a signed length and a
    /// charset tag.
    pub fn from_parts(length: i64, charset: &str) -> Result<Self, TokenError> {
        let length = usize::try_from(length)
            .map_err(|_| TokenError::InvalidRequest(format!("length must be positive, got {length}")))?;
        let charset = charset
            .parse::<CharsetKind>()
            .map_err(|e| TokenError::InvalidRequest(e.to_string()))?;
        Self::new(length, charset)
    }

    /// Checks the request invariants.
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.length == 0 {
            return Err(TokenError::InvalidRequest(
                "length must be positive, got 0".to_string(),
            ));
        }
        Ok(())
    }
}

//! Token sampling and permutation.
//!
//! A token is built in two stages:
//!
//! 1. **Sampling**: each position independently draws one alphabet index
//!    with [`EntropySource::uniform_below`]. Characters may repeat.
//! 2. **Permutation**: the sampled sequence is reordered according to the
//!    configured [`ShuffleStrategy`].
//!
//! Every call draws all of its randomness fresh, so no two calls share
//! state and nothing about one token predicts another.

use super::GenerationRequest;
use crate::entropy::{EntropyError, EntropySource, OsEntropySource};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound (exclusive) on the number of passes drawn by
/// [`ShuffleStrategy::RepeatedSortKey`].
const MAX_SORT_KEY_PASSES: u64 = 100;

/// Errors that can occur during token generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The entropy source failed during a draw.
    #[error("entropy failure: {0}")]
    Entropy(#[from] EntropyError),
    /// The caller supplied a non-positive length or an unknown charset.
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),
}

/// How the sampled characters are permuted before being returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShuffleStrategy {
    /// One Fisher-Yates pass driven by `uniform_below`.
    #[default]
    FisherYates,
    /// Draws `k` in `[0, 100)` and applies `k` decorate-sort-undecorate
    /// passes, each keying every element with a fresh `uniform_unit`.
    ///
    /// Kept for output compatibility with older deployments. It is no more
    /// random than a single pass.
    RepeatedSortKey,
}

impl ShuffleStrategy {
    /// Returns the tag used in configuration and on the command line.
    pub const fn tag(self) -> &'static str {
        match self {
            ShuffleStrategy::FisherYates => "fisher-yates",
            ShuffleStrategy::RepeatedSortKey => "repeated-sort-key",
        }
    }
}

impl fmt::Display for ShuffleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ShuffleStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fisher-yates" => Ok(ShuffleStrategy::FisherYates),
            "repeated-sort-key" => Ok(ShuffleStrategy::RepeatedSortKey),
            other => Err(format!(
                "unknown shuffle strategy {other:?} (expected fisher-yates or repeated-sort-key)"
            )),
        }
    }
}

/// Generates random tokens from an entropy source.
///
/// The generator itself is immutable; with [`OsEntropySource`] it can be
/// shared freely between threads.
#[derive(Debug, Clone)]
pub struct TokenGenerator<E = OsEntropySource> {
    entropy: E,
    shuffle: ShuffleStrategy,
}

impl TokenGenerator<OsEntropySource> {
    /// Creates a generator backed by the OS CSPRNG.
    pub fn new() -> Self {
        Self::with_entropy(OsEntropySource::new())
    }
}

impl Default for TokenGenerator<OsEntropySource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntropySource> TokenGenerator<E> {
    /// Creates a generator over a specific entropy source.
    pub fn with_entropy(entropy: E) -> Self {
        Self {
            entropy,
            shuffle: ShuffleStrategy::default(),
        }
    }

    /// Selects the permutation strategy.
    pub fn with_shuffle(mut self, shuffle: ShuffleStrategy) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Returns the permutation strategy in use.
    pub fn shuffle_strategy(&self) -> ShuffleStrategy {
        self.shuffle
    }

    /// Returns the underlying entropy source.
    pub fn entropy(&self) -> &E {
        &self.entropy
    }

    /// Generates a token for the given request.
    ///
    /// The result has exactly `request.length` characters, all taken from
    /// `request.charset`'s alphabet.
    ///
    /// # Errors
    ///
    /// - [`TokenError::InvalidRequest`] if the length is zero.
    /// - [`TokenError::Entropy`] if the entropy source fails at any draw.
    pub fn generate(&self, request: &GenerationRequest) -> Result<String, TokenError> {
        request.validate()?;

        let alphabet = request.charset.alphabet().as_bytes();
        let mut chars = self.sample(alphabet, request.length)?;

        match self.shuffle {
            ShuffleStrategy::FisherYates => self.fisher_yates(&mut chars)?,
            ShuffleStrategy::RepeatedSortKey => {
                let passes = self.entropy.uniform_below(MAX_SORT_KEY_PASSES)?;
                for _ in 0..passes {
                    chars = self.sort_key_shuffle(chars)?;
                }
                tracing::trace!(passes, "applied sort-key shuffle passes");
            }
        }

        tracing::debug!(
            length = request.length,
            charset = %request.charset,
            shuffle = %self.shuffle,
            "generated token"
        );

        // Alphabets are ASCII, so each byte is one char.
        Ok(chars.into_iter().map(char::from).collect())
    }

    /// Draws `length` characters independently and uniformly from `alphabet`.
    fn sample(&self, alphabet: &[u8], length: usize) -> Result<Vec<u8>, EntropyError> {
        let bound = alphabet.len() as u64;
        (0..length)
            .map(|_| {
                let index = self.entropy.uniform_below(bound)? as usize;
                Ok(alphabet[index])
            })
            .collect()
    }

    /// Permutes `chars` in place with a single Fisher-Yates pass.
    fn fisher_yates(&self, chars: &mut [u8]) -> Result<(), EntropyError> {
        for i in (1..chars.len()).rev() {
            let j = self.entropy.uniform_below(i as u64 + 1)? as usize;
            chars.swap(i, j);
        }
        Ok(())
    }

    /// Decorates every element with a random key, sorts by key, and strips
    /// the keys again.
    fn sort_key_shuffle(&self, chars: Vec<u8>) -> Result<Vec<u8>, EntropyError> {
        let mut decorated = chars
            .into_iter()
            .map(|c| Ok((self.entropy.uniform_unit()?, c)))
            .collect::<Result<Vec<(f64, u8)>, EntropyError>>()?;

        // Stable, so equal keys keep their relative order.
        decorated.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(decorated.into_iter().map(|(_, c)| c).collect())
    }
}

//! Character sets eligible for token generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MIXED: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "0123456789abcdefghijklmnopqrstuvwxyz";
const NUMERIC: &str = "0123456789";

/// Closed set of alphabets a token can be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CharsetKind {
    /// Digits plus upper- and lowercase ASCII letters.
    #[default]
    #[serde(rename = "mixed")]
    Mixed,
    /// Digits plus uppercase ASCII letters.
    #[serde(rename = "upper")]
    UpperOnly,
    /// Digits plus lowercase ASCII letters.
    #[serde(rename = "lower")]
    LowerOnly,
    /// Decimal digits only.
    #[serde(rename = "number", alias = "numeric")]
    NumericOnly,
}

impl CharsetKind {
    /// Every kind, in declaration order.
    pub const ALL: [CharsetKind; 4] = [
        CharsetKind::Mixed,
        CharsetKind::UpperOnly,
        CharsetKind::LowerOnly,
        CharsetKind::NumericOnly,
    ];

    /// Returns the ordered, duplicate-free ASCII alphabet for this kind.
    pub const fn alphabet(self) -> &'static str {
        match self {
            CharsetKind::Mixed => MIXED,
            CharsetKind::UpperOnly => UPPER,
            CharsetKind::LowerOnly => LOWER,
            CharsetKind::NumericOnly => NUMERIC,
        }
    }

    /// Returns the tag used in configuration and by host callers.
    pub const fn tag(self) -> &'static str {
        match self {
            CharsetKind::Mixed => "mixed",
            CharsetKind::UpperOnly => "upper",
            CharsetKind::LowerOnly => "lower",
            CharsetKind::NumericOnly => "number",
        }
    }
}

impl fmt::Display for CharsetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A charset tag that names no known alphabet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown charset kind {0:?} (expected mixed, upper, lower or number)")]
pub struct UnknownCharset(pub String);

impl FromStr for CharsetKind {
    type Err = UnknownCharset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mixed" => Ok(CharsetKind::Mixed),
            "upper" => Ok(CharsetKind::UpperOnly),
            "lower" => Ok(CharsetKind::LowerOnly),
            "number" | "numeric" => Ok(CharsetKind::NumericOnly),
            other => Err(UnknownCharset(other.to_string())),
        }
    }
}

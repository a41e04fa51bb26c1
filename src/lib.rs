//! Credential Forge Library
//!
//! Cryptographically sourced random tokens and credential strength checks.
//!
//! # Architecture
//!
//! ```text
//! entropy → token            policy
//!              ↓
//!          analysis (uniformity audit)
//! ```
//!
//! - [`entropy`]: the [`EntropySource`] capability. Production code uses
//!   [`OsEntropySource`]; tests can inject a [`DeterministicEntropySource`].
//! - [`token`]: samples a string over a [`CharsetKind`] alphabet and
//!   permutes it.
//! - [`policy`]: checks a candidate secret against [`PolicyRules`].
//!
//! # Design Principles
//!
//! - **Fail-closed**: an unreadable entropy source is an error, never a
//!   silent fallback to a weaker generator
//! - **Stateless**: every call is a pure function of its inputs plus fresh
//!   entropy; everything is safe to share across threads
//! - **Rules are opt-in**: a disabled policy rule is not checked at all
//!
//! # Example
//!
//! ```
//! use credential_forge::{
//!     CharsetKind, GenerationRequest, PolicyRules, PolicyValidator, TokenGenerator,
//! };
//!
//! let generator = TokenGenerator::new();
//! let request = GenerationRequest::new(6, CharsetKind::NumericOnly).unwrap();
//! let code = generator.generate(&request).unwrap();
//! assert_eq!(code.len(), 6);
//!
//! let validator = PolicyValidator::new(PolicyRules::strong(8));
//! assert!(validator.validate("Tr0ub4dor&3"));
//! assert!(!validator.validate("password"));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod entropy;
pub mod metrics;
pub mod policy;
pub mod token;

// Re-export commonly used types at crate root
pub use analysis::{UniformityReport, UniformityThresholds, UniformityViolation};
pub use config::{ConfigError, FileConfig};
pub use entropy::{DeterministicEntropySource, EntropyError, EntropySource, OsEntropySource};
pub use policy::{PolicyRule, PolicyRules, PolicyValidator};
pub use token::{CharsetKind, GenerationRequest, ShuffleStrategy, TokenError, TokenGenerator};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generates a token from host-supplied parameters using the OS CSPRNG.
///
/// `charset_kind` is one of `mixed`, `upper`, `lower` or `number`.
///
/// # Errors
///
/// [`TokenError::InvalidRequest`] for a non-positive length or an unknown
/// charset tag, [`TokenError::Entropy`] if the OS source cannot be read.
pub fn generate_token(length: i64, charset_kind: &str) -> Result<String, TokenError> {
    let request = GenerationRequest::from_parts(length, charset_kind)?;
    TokenGenerator::new().generate(&request)
}

/// Checks `candidate` against `policy`. See [`policy::validate`].
pub fn validate_password(candidate: &str, policy: &PolicyRules) -> bool {
    policy::validate(candidate, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_numeric_code() {
        let code = generate_token(6, "number").unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_token_rejects_bad_input() {
        assert!(matches!(generate_token(0, "mixed"), Err(TokenError::InvalidRequest(_))));
        assert!(matches!(generate_token(-1, "mixed"), Err(TokenError::InvalidRequest(_))));
        assert!(matches!(generate_token(8, "base64"), Err(TokenError::InvalidRequest(_))));
    }

    #[test]
    fn test_validate_password_scenarios() {
        let alpha_numeric = PolicyRules::none().with_alpha().with_numeric();
        assert!(validate_password("abc123", &alpha_numeric));
        assert!(!validate_password("abcdef", &PolicyRules::none().with_numeric()));
        assert!(!validate_password("aabbcc", &PolicyRules::none().with_no_consecutive()));
        assert!(validate_password("", &PolicyRules::none()));
        assert!(!validate_password("pw", &PolicyRules::none().with_min_length(8)));
    }
}

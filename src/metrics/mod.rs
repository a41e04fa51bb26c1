//! Prometheus counters for token and policy activity.
//!
//! The library never updates these on its own; a host records outcomes
//! after each call and scrapes or prints the text encoding.
//!
//! # Metrics Exposed
//!
//! - `credential_tokens_generated_total` - Tokens generated
//! - `credential_token_chars_total` - Characters across all generated tokens
//! - `credential_generation_failures_total` - Generation calls that failed
//! - `credential_validations_passed_total` - Candidates that met the policy
//! - `credential_validations_failed_total` - Candidates that did not
//! - `credential_uniformity_chi_square` - Statistic from the latest audit
//!
//! # Example
//!
//! ```
//! use credential_forge::metrics::MetricsRegistry;
//! use credential_forge::{validate_password, PolicyRules};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! let passed = validate_password("Tr0ub4dor&3", &PolicyRules::strong(8));
//! registry.record_validation(passed);
//!
//! assert!(registry.encode().unwrap().contains("credential_validations_passed_total 1"));
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry};

//! Output uniformity testing.
//!
//! A chi-square goodness-of-fit check over generated characters. This
//! catches broken sampling (bias, stuck indices, truncated alphabets); it
//! is a sanity check, not a proof of cryptographic quality.

mod statistics;
mod threshold;

pub use statistics::{audit_charset, UniformityReport};
pub use threshold::{UniformityThresholds, UniformityViolation};

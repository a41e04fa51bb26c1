//! Credential composition policy.
//!
//! A policy is a set of independently togglable rules. A candidate passes
//! when every enabled rule holds; a disabled rule is simply not checked.

mod rules;
mod validator;

pub use rules::{PolicyRule, PolicyRules, SYMBOLS};
pub use validator::{validate, violations, PolicyValidator};

//! Cryptographically secure randomness.
//!
//! This module defines the [`EntropySource`] capability and its backends.
//! Token generation only ever talks to the trait, so the OS CSPRNG can be
//! swapped for a hardware RNG or a seeded source in tests without touching
//! the generator.

mod deterministic;
mod os;
mod source;
#[cfg(test)]
pub(crate) mod testing;

pub use deterministic::DeterministicEntropySource;
pub use os::OsEntropySource;
pub use source::{EntropyError, EntropySource};

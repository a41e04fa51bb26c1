//! Operating system CSPRNG backend.

use super::{EntropyError, EntropySource};
use rand_core::{OsRng, RngCore};

/// Entropy drawn straight from the operating system CSPRNG.
///
/// Holds no state: every call reads the OS pool (`getrandom` on Linux,
/// `getentropy` on macOS, `BCryptGenRandom` on Windows), so there is no
/// seed to leak and nothing to re-initialize after a fork.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropySource;

impl OsEntropySource {
    /// Creates a handle to the OS CSPRNG.
    pub fn new() -> Self {
        Self
    }
}

impl EntropySource for OsEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| EntropyError::Unavailable(e.to_string()))
    }
}

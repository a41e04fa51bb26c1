//! Scripted entropy sources for unit tests.

use super::{EntropyError, EntropySource, OsEntropySource};
use std::cell::Cell;

/// Replays a fixed byte pattern forever.
pub(crate) struct FixedEntropySource {
    pattern: Vec<u8>,
    offset: Cell<usize>,
}

impl FixedEntropySource {
    pub(crate) fn repeating(pattern: &[u8]) -> Self {
        assert!(!pattern.is_empty(), "pattern must not be empty");
        Self {
            pattern: pattern.to_vec(),
            offset: Cell::new(0),
        }
    }
}

impl EntropySource for FixedEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        for byte in dest.iter_mut() {
            let i = self.offset.get();
            *byte = self.pattern[i % self.pattern.len()];
            self.offset.set(i + 1);
        }
        Ok(())
    }
}

/// Delegates to the OS source until the Nth call (1-indexed), which fails.
pub(crate) struct FailingEntropySource {
    fail_at: usize,
    calls: Cell<usize>,
}

impl FailingEntropySource {
    pub(crate) fn always() -> Self {
        Self::at_nth_call(1)
    }

    pub(crate) fn at_nth_call(fail_at: usize) -> Self {
        Self {
            fail_at,
            calls: Cell::new(0),
        }
    }
}

impl EntropySource for FailingEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        if call >= self.fail_at {
            return Err(EntropyError::Unavailable("simulated entropy failure".into()));
        }
        OsEntropySource.fill_bytes(dest)
    }
}

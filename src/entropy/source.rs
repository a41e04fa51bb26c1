//! The entropy capability and its uniform draws.

use thiserror::Error;

/// 2^32 as a float, the denominator of [`EntropySource::uniform_unit`].
const U32_RANGE: f64 = 4_294_967_296.0;

/// Errors raised while drawing randomness.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntropyError {
    /// The underlying secure generator could not be read.
    #[error("secure entropy source unavailable: {0}")]
    Unavailable(String),
    /// `uniform_below` was called with a bound of zero.
    #[error("uniform draw requested below a zero bound")]
    ZeroBound,
}

/// A cryptographically secure source of random bytes.
///
/// Implementors only provide [`fill_bytes`](Self::fill_bytes); the uniform
/// draws are derived from it. Implementations must never fall back to a
/// non-cryptographic generator when the underlying source fails.
pub trait EntropySource {
    /// Fills `dest` with secure random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EntropyError::Unavailable`] if the source cannot be read.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;

    /// Draws 4 bytes and reads them as a little-endian `u32`.
    fn next_u32(&self) -> Result<u32, EntropyError> {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Returns a uniform value in `[0, 1)` with 2^32 equally likely buckets.
    fn uniform_unit(&self) -> Result<f64, EntropyError> {
        Ok(f64::from(self.next_u32()?) / U32_RANGE)
    }

    /// Returns a uniform integer in `[0, n)`.
    ///
    /// Equal to `floor(uniform_unit() * n)`, computed in integer arithmetic
    /// so the result is exact for every `n`. Bounds that do not divide 2^32
    /// carry a bias of at most `n / 2^32`, which is accepted.
    fn uniform_below(&self, n: u64) -> Result<u64, EntropyError> {
        if n == 0 {
            return Err(EntropyError::ZeroBound);
        }
        let draw = u128::from(self.next_u32()?);
        Ok(((draw * u128::from(n)) >> 32) as u64)
    }
}

impl<E: EntropySource + ?Sized> EntropySource for &E {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill_bytes(dest)
    }
}

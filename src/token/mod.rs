//! Random token generation.
//!
//! Tokens are sampled position by position from a fixed alphabet and then
//! permuted. All randomness comes from an [`EntropySource`](crate::entropy::EntropySource).

mod charset;
mod generator;
mod request;

pub use charset::{CharsetKind, UnknownCharset};
pub use generator::{ShuffleStrategy, TokenError, TokenGenerator};
pub use request::GenerationRequest;

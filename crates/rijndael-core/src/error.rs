//! Error type for the public cipher entry points.

use thiserror::Error;

/// Failure reported by the validated cipher and decipher entry points.
///
/// Once the inputs pass validation there is no internal failure path: either
/// the full round sequence completes or this error is returned up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CipherError {
    /// The supplied key is not 16, 24, or 32 bytes long.
    #[error("invalid key length: expected 16, 24, or 32 bytes, got {0}")]
    InvalidKeyLength(usize),
}

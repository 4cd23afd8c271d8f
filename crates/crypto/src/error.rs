//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors that can occur when building or opening authenticated structures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("Leaf index out of range: index {index}, capacity {capacity}")]
    IndexOutOfRange { index: u64, capacity: u64 },

    #[error("Invalid tree height: {height} (must be 1..=32)")]
    InvalidHeight { height: u32 },

    #[error("Witness path length mismatch: expected {expected}, got {got}")]
    PathLengthMismatch { expected: usize, got: usize },
}

//! Error types for the bundle loader core.

use thiserror::Error;

use crate::cid::Cid;

/// Errors raised while parsing or validating content-addressed data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid cid: {0}")]
    InvalidCid(String),

    #[error("unknown codec: 0x{0:02x}")]
    UnknownCodec(u8),

    #[error("block digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: Cid, actual: Cid },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

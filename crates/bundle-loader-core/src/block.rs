//! Blocks: bytes paired with the cid that addresses them.

use bytes::Bytes;

use crate::cid::{Cid, Codec};
use crate::error::{CoreError, Result};

/// An immutable content-addressed block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    cid: Cid,
    data: Bytes,
}

impl Block {
    /// Create a block, computing its cid.
    pub fn new(codec: Codec, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let cid = Cid::of(codec, &data);
        Self { cid, data }
    }

    /// Create a block from an externally supplied cid, checking the digest.
    pub fn from_parts(cid: Cid, data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        let actual = Cid::of(cid.codec(), &data);
        if actual != cid {
            return Err(CoreError::DigestMismatch {
                expected: cid,
                actual,
            });
        }
        Ok(Self { cid, data })
    }

    pub fn cid(&self) -> &Cid {
        &self.cid
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

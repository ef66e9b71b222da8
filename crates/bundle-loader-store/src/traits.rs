//! Blockstore trait: the abstract interface for block persistence.
//!
//! This trait allows the loader to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use bytes::Bytes;

use bundle_loader_core::{Block, Cid};

use crate::error::Result;

/// Result of writing a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// Block was written.
    Inserted,
    /// Block already exists (idempotent - not an error).
    AlreadyExists,
}

/// The Blockstore trait: async interface for content-addressed storage.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, `spawn_blocking` is used internally to avoid blocking the runtime.
///
/// There is no conflict case: the key is derived from the value, so two
/// writers of the same cid always write the same bytes.
#[async_trait]
pub trait Blockstore: Send + Sync {
    /// Check whether a block exists.
    async fn has(&self, cid: &Cid) -> Result<bool>;

    /// Get a block's bytes by cid.
    async fn get(&self, cid: &Cid) -> Result<Option<Bytes>>;

    /// Write a block.
    ///
    /// The block's cid has already been checked against its bytes by
    /// [`Block`] construction.
    async fn put(&self, block: &Block) -> Result<InsertResult>;

    /// Write several blocks, returning how many were new.
    ///
    /// Not atomic: blocks before a failing one stay written.
    async fn put_many(&self, blocks: &[Block]) -> Result<usize> {
        let mut inserted = 0;
        for block in blocks {
            if self.put(block).await? == InsertResult::Inserted {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Number of blocks held.
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

//! In-memory implementation of the Blockstore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;

use bundle_loader_core::{Block, Cid};

use crate::error::{Result, StoreError};
use crate::traits::{Blockstore, InsertResult};

/// In-memory block store.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryBlockstore {
    blocks: RwLock<HashMap<Cid, Bytes>>,
}

impl MemoryBlockstore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blocks: RwLock::new(HashMap::new()),
        }
    }

    /// All cids currently held, in no particular order.
    pub fn cids(&self) -> Result<Vec<Cid>> {
        Ok(self.read()?.keys().copied().collect())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Cid, Bytes>>> {
        self.blocks
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Cid, Bytes>>> {
        self.blocks
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryBlockstore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Blockstore for MemoryBlockstore {
    async fn has(&self, cid: &Cid) -> Result<bool> {
        Ok(self.read()?.contains_key(cid))
    }

    async fn get(&self, cid: &Cid) -> Result<Option<Bytes>> {
        Ok(self.read()?.get(cid).cloned())
    }

    async fn put(&self, block: &Block) -> Result<InsertResult> {
        let mut blocks = self.write()?;

        if blocks.contains_key(block.cid()) {
            Ok(InsertResult::AlreadyExists)
        } else {
            blocks.insert(*block.cid(), block.data().clone());
            Ok(InsertResult::Inserted)
        }
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}

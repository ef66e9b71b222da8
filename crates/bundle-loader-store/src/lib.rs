//! # Bundle Loader Store
//!
//! Storage abstraction for the bundle loader. Provides a trait-based interface
//! for content-addressed block persistence with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The loader only ever asks two things of a store: "do you have this cid?"
//! and "keep this block". Those live behind the [`Blockstore`] trait so the
//! loader is storage-agnostic. [`SqliteBlockstore`] persists to disk,
//! [`MemoryBlockstore`] is for tests.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bundle_loader_core::{Block, Codec};
//! use bundle_loader_store::{Blockstore, SqliteBlockstore};
//!
//! async fn example() {
//!     let store = SqliteBlockstore::open("blocks.db").unwrap();
//!
//!     let block = Block::new(Codec::Raw, &b"payload"[..]);
//!     store.put(&block).await.unwrap();
//!     assert!(store.has(block.cid()).await.unwrap());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Idempotent writes**: putting the same block twice returns `AlreadyExists`
//! - **Append-only**: there is no delete; content-addressed writes converge
//! - **No transactions across blocks**: a failed multi-block write leaves the
//!   blocks written so far in place

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryBlockstore;
pub use sqlite::SqliteBlockstore;
pub use traits::{Blockstore, InsertResult};

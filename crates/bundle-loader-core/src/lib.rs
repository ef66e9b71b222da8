//! # Bundle Loader Core
//!
//! Pure primitives for the bundle loader: content identifiers, blocks,
//! manifest versions, and decoded archive headers.
//!
//! This crate contains no I/O, no storage, no async. It is pure computation
//! over content-addressed data.
//!
//! ## Key Types
//!
//! - [`Cid`] - Self-describing content identifier (codec + Blake3 digest)
//! - [`Block`] - A cid paired with the bytes it addresses
//! - [`Version`] - Generation tag of the manifest family
//! - [`ArchiveHeader`] - Root list produced by decoding an archive

pub mod archive;
pub mod block;
pub mod cid;
pub mod error;
pub mod hash;
pub mod version;

pub use archive::ArchiveHeader;
pub use block::Block;
pub use cid::{Cid, Codec};
pub use error::{CoreError, Result};
pub use hash::Blake3Hash;
pub use version::{Version, MIN_BUNDLE_VERSION};

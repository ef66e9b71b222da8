//! # Bundle Loader
//!
//! Versioned bundle resolution and integrity-checked loading into a
//! content-addressed block store.
//!
//! ## Overview
//!
//! A *bundle* is a serialized archive of blocks holding one version's
//! manifest tree. This crate:
//!
//! - **Loads** a single archive into a [`Blockstore`](store::Blockstore) and
//!   returns its one root ([`BundleLoader`])
//! - **Resolves** where each version's bundle lives: an override variable,
//!   a release catalogue path, or an embedded copy ([`source`])
//! - **Verifies** the loaded root against the [`ManifestRegistry`]
//!   ([`BundleManager`])
//!
//! The archive format is not implemented here; callers supply an
//! [`ArchiveDecoder`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bundle_loader::{
//!     ArchiveDecoder, BundleLoader, BundleManager, LoaderConfig, ManifestRegistry, ProcessEnv,
//!     ReleaseCatalogue, Version,
//! };
//! use bundle_loader::store::SqliteBlockstore;
//!
//! async fn example<D: ArchiveDecoder>(decoder: D) {
//!     let manifests = ManifestRegistry::from_file("manifests.json").unwrap();
//!     let releases = ReleaseCatalogue::from_file("releases.json")
//!         .unwrap()
//!         .with_embedded(Version(8), &b"..."[..]);
//!
//!     let manager = BundleManager::new(
//!         BundleLoader::new(decoder),
//!         Arc::new(manifests),
//!         Arc::new(releases),
//!         Arc::new(ProcessEnv),
//!         LoaderConfig::from_env(&ProcessEnv),
//!     );
//!
//!     let store = SqliteBlockstore::open("blocks.db").unwrap();
//!     manager
//!         .load_bundles(&store, &[Version(8), Version(9)])
//!         .await
//!         .unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `bundle_loader::core` - Core primitives (Cid, Block, Version, ...)
//! - `bundle_loader::store` - Blockstore trait and implementations

pub mod bundles;
pub mod catalogue;
pub mod config;
pub mod decoder;
pub mod env;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod source;

// Re-export component crates
pub use bundle_loader_core as core;
pub use bundle_loader_store as store;

// Re-export main types for convenience
pub use bundles::{BundleManager, VersionOutcome};
pub use catalogue::{ReleaseCatalogue, ReleaseEntry};
pub use config::LoaderConfig;
pub use decoder::{ArchiveDecoder, DecodeResult};
pub use env::{EnvLookup, ProcessEnv};
pub use error::{BundleError, ConfigError, DecodeError, LoadError, Result};
pub use loader::BundleLoader;
pub use manifest::ManifestRegistry;
pub use source::{BundleSource, SourceKind};

pub use bundle_loader_core::{ArchiveHeader, Block, Cid, Codec, Version, MIN_BUNDLE_VERSION};

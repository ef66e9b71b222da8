//! Error types for bundle loading.

use std::path::PathBuf;

use bundle_loader_core::{Cid, CoreError, Version};
use bundle_loader_store::StoreError;
use thiserror::Error;

use crate::source::SourceKind;

/// Errors raised by an [`ArchiveDecoder`](crate::decoder::ArchiveDecoder).
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Reading the byte stream failed.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream is not a well-formed archive.
    #[error("malformed archive: {0}")]
    Malformed(String),

    /// A block's bytes do not match its cid.
    #[error("invalid block: {0}")]
    Block(#[from] CoreError),

    /// Writing a decoded block failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors from loading a single archive.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The bundle file could not be opened.
    #[error("error opening bundle {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive did not decode.
    #[error("error loading bundle: {0}")]
    Decode(#[source] DecodeError),

    /// The archive header does not name exactly one root.
    #[error("expected one root when loading bundle, got {0}")]
    RootCount(usize),
}

/// Errors from loading a set of versioned bundles.
///
/// All variants are fatal for the whole operation.
#[derive(Debug, Error)]
pub enum BundleError {
    /// No manifest registered for the version.
    #[error("unknown manifest for version {0}")]
    UnknownManifest(Version),

    /// No release catalogue entry for the version.
    #[error("unknown release for version {0}")]
    UnknownRelease(Version),

    /// Querying the store for the manifest failed.
    #[error("blockstore error when loading manifest {manifest}: {source}")]
    Store {
        manifest: Cid,
        #[source]
        source: StoreError,
    },

    /// No override, catalogue path, or embedded payload for the version.
    #[error("bundle for version {0} not found")]
    NotFound(Version),

    /// The resolved source failed to load.
    #[error("failed to load bundle for version {version} from {from}: {source}")]
    Load {
        version: Version,
        from: SourceKind,
        #[source]
        source: LoadError,
    },

    /// The loaded root is not the registered manifest.
    #[error(
        "expected manifest for version {version} does not match actual: {expected} != {actual}"
    )]
    ManifestMismatch {
        version: Version,
        expected: Cid,
        actual: Cid,
    },
}

/// Errors reading registry, catalogue, or loader configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for bundle operations.
pub type Result<T> = std::result::Result<T, BundleError>;

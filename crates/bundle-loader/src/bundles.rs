//! Multi-version bundle loading.
//!
//! [`BundleManager`] makes sure the bundle for each requested version is in a
//! block store and that its root is the manifest registered for that version.
//!
//! ## Per-version steps
//!
//! 1. Versions below [`MIN_BUNDLE_VERSION`](bundle_loader_core::MIN_BUNDLE_VERSION)
//!    have no bundle and are skipped.
//! 2. The expected manifest comes from the [`ManifestRegistry`]. A missing
//!    entry is a build defect and aborts.
//! 3. If the store already has the manifest it has everything under it, so
//!    the version is skipped without touching any source.
//! 4. A source is picked by [`source::resolve`] and loaded.
//! 5. The loaded root must equal the manifest.
//!
//! Versions are handled one at a time in the order given, and the first
//! error stops the whole call. Nothing is rolled back: blocks written before
//! a failure stay in the store.

use std::path::PathBuf;
use std::sync::Arc;

use bundle_loader_core::{Cid, Version};
use bundle_loader_store::Blockstore;

use crate::catalogue::ReleaseCatalogue;
use crate::config::LoaderConfig;
use crate::decoder::ArchiveDecoder;
use crate::env::EnvLookup;
use crate::error::{BundleError, LoadError, Result};
use crate::loader::BundleLoader;
use crate::manifest::ManifestRegistry;
use crate::source::{self, BundleSource, ResolveContext, SourceKind};

/// What happened to one requested version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOutcome {
    /// No bundles exist for this generation.
    BelowMinimum,
    /// The manifest root was already in the store.
    AlreadyPresent,
    /// The bundle was loaded from the given source and verified.
    Loaded(SourceKind),
}

/// Resolves, loads, and verifies versioned bundles.
pub struct BundleManager<D> {
    loader: BundleLoader<D>,
    manifests: Arc<ManifestRegistry>,
    releases: Arc<ReleaseCatalogue>,
    env: Arc<dyn EnvLookup>,
    config: LoaderConfig,
}

impl<D: ArchiveDecoder> BundleManager<D> {
    pub fn new(
        loader: BundleLoader<D>,
        manifests: Arc<ManifestRegistry>,
        releases: Arc<ReleaseCatalogue>,
        env: Arc<dyn EnvLookup>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            loader,
            manifests,
            releases,
            env,
            config,
        }
    }

    /// Load the bundles for `versions` into `store`, in order.
    ///
    /// Duplicates are processed again (and skip as already present). Stops at
    /// the first error; versions after it are left untouched.
    pub async fn load_bundles(&self, store: &dyn Blockstore, versions: &[Version]) -> Result<()> {
        for &version in versions {
            self.load_version(store, version).await?;
        }
        Ok(())
    }

    /// Load and verify the bundle for a single version.
    pub async fn load_version(
        &self,
        store: &dyn Blockstore,
        version: Version,
    ) -> Result<VersionOutcome> {
        if !version.has_bundle() {
            tracing::debug!(%version, "no bundle before minimum version, skipping");
            return Ok(VersionOutcome::BelowMinimum);
        }

        let manifest = self
            .manifests
            .get(version)
            .ok_or(BundleError::UnknownManifest(version))?;

        let present = store
            .has(&manifest)
            .await
            .map_err(|source| BundleError::Store { manifest, source })?;
        if present {
            tracing::debug!(%version, %manifest, "manifest already in store, skipping");
            return Ok(VersionOutcome::AlreadyPresent);
        }

        let source = self.resolve(version)?;
        tracing::debug!(%version, %source, "resolved bundle source");

        let root = self.load_from(store, &source).await.map_err(|e| BundleError::Load {
            version,
            from: source.kind(),
            source: e,
        })?;

        if root != manifest {
            tracing::warn!(%version, expected = %manifest, actual = %root, "bundle root mismatch");
            return Err(BundleError::ManifestMismatch {
                version,
                expected: manifest,
                actual: root,
            });
        }

        tracing::info!(%version, %manifest, %source, "loaded bundle");
        Ok(VersionOutcome::Loaded(source.kind()))
    }

    /// Pick the source for `version`.
    fn resolve(&self, version: Version) -> Result<BundleSource> {
        let release = self
            .releases
            .get(version)
            .ok_or(BundleError::UnknownRelease(version))?;

        let ctx = ResolveContext {
            override_path: self
                .env
                .var(&self.config.override_var(version))
                .map(PathBuf::from),
            network: &self.config.network,
            release,
        };

        source::resolve(&ctx).ok_or(BundleError::NotFound(version))
    }

    async fn load_from(
        &self,
        store: &dyn Blockstore,
        source: &BundleSource,
    ) -> std::result::Result<Cid, LoadError> {
        match source {
            BundleSource::Override(path) | BundleSource::Catalogue(path) => {
                self.loader.load_file(store, path).await
            }
            BundleSource::Embedded(bytes) => self.loader.load(store, &bytes[..]).await,
        }
    }
}

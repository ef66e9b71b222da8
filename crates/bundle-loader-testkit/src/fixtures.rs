//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use bundle_loader::{
    BundleLoader, BundleManager, LoaderConfig, ManifestRegistry, ReleaseCatalogue,
};
use bundle_loader_core::{Block, Cid, Codec, Version};
use bundle_loader_store::MemoryBlockstore;

use crate::archive::{FixtureArchive, FixtureDecoder};

/// A generated bundle: its blocks, its manifest root, and its encoding.
#[derive(Debug, Clone)]
pub struct ManifestBundle {
    pub version: Version,
    pub root: Cid,
    pub blocks: Vec<Block>,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
struct ManifestNode {
    version: u32,
    entries: Vec<Vec<u8>>,
}

/// Build a deterministic bundle for `version`.
///
/// The tree is a dag-cbor manifest node linking to `entry_count` raw blocks.
pub fn manifest_bundle(version: Version, entry_count: usize) -> ManifestBundle {
    let entries: Vec<Block> = (0..entry_count)
        .map(|i| Block::new(Codec::Raw, format!("{} entry {}", version, i).into_bytes()))
        .collect();

    let node = ManifestNode {
        version: version.get(),
        entries: entries.iter().map(|b| b.cid().to_bytes().to_vec()).collect(),
    };
    let mut node_bytes = Vec::new();
    ciborium::into_writer(&node, &mut node_bytes).expect("encode manifest node");
    let manifest = Block::new(Codec::DagCbor, node_bytes);

    let root = *manifest.cid();
    let mut blocks = entries;
    blocks.push(manifest);

    let bytes = FixtureArchive::new().root(root).blocks(&blocks).encode();

    ManifestBundle {
        version,
        root,
        blocks,
        bytes,
    }
}

/// A test fixture with a memory store, a counting decoder, and mutable
/// registry, catalogue, and environment tables.
pub struct TestFixture {
    pub store: MemoryBlockstore,
    pub decoder: Arc<FixtureDecoder>,
    pub manifests: ManifestRegistry,
    pub releases: ReleaseCatalogue,
    pub env: HashMap<String, OsString>,
    pub config: LoaderConfig,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            store: MemoryBlockstore::new(),
            decoder: Arc::new(FixtureDecoder::new()),
            manifests: ManifestRegistry::new(),
            releases: ReleaseCatalogue::new(),
            env: HashMap::new(),
            config: LoaderConfig::default(),
        }
    }

    /// Register `bundle.root` as the manifest for its version.
    pub fn register(&mut self, bundle: &ManifestBundle) -> &mut Self {
        self.manifests.register(bundle.version, bundle.root);
        self
    }

    /// Embed `bytes` as the bundle for `version`.
    pub fn embed(&mut self, version: Version, bytes: Vec<u8>) -> &mut Self {
        self.releases.release_mut(version).set_embedded(bytes);
        self
    }

    /// Pin a catalogue path for `version` on the configured network.
    pub fn pin_path(&mut self, version: Version, path: impl Into<PathBuf>) -> &mut Self {
        let network = self.config.network.clone();
        self.releases
            .release_mut(version)
            .paths
            .insert(network, path.into());
        self
    }

    /// Set the override variable for `version`.
    pub fn set_override(&mut self, version: Version, path: impl Into<OsString>) -> &mut Self {
        let var = self.config.override_var(version);
        self.env.insert(var, path.into());
        self
    }

    pub fn clear_override(&mut self, version: Version) -> &mut Self {
        let var = self.config.override_var(version);
        self.env.remove(&var);
        self
    }

    /// Register and embed a fresh bundle for `version`.
    pub fn with_embedded_bundle(&mut self, version: Version) -> ManifestBundle {
        let bundle = manifest_bundle(version, 2);
        self.register(&bundle).embed(version, bundle.bytes.clone());
        bundle
    }

    /// A manager over snapshots of the current tables, sharing the decoder.
    pub fn manager(&self) -> BundleManager<Arc<FixtureDecoder>> {
        BundleManager::new(
            BundleLoader::new(Arc::clone(&self.decoder)),
            Arc::new(self.manifests.clone()),
            Arc::new(self.releases.clone()),
            Arc::new(self.env.clone()),
            self.config.clone(),
        )
    }

    pub fn decode_count(&self) -> usize {
        self.decoder.decode_count()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

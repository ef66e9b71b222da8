//! Proptest generators for property-based testing.

use proptest::prelude::*;

use bundle_loader_core::{Block, Blake3Hash, Cid, Codec, Version};

use crate::archive::FixtureArchive;

/// Generate a random Codec.
pub fn codec() -> impl Strategy<Value = Codec> {
    prop_oneof![Just(Codec::Raw), Just(Codec::DagCbor)]
}

/// Generate a random Cid (not necessarily the cid of any known block).
pub fn cid() -> impl Strategy<Value = Cid> {
    (codec(), any::<[u8; 32]>()).prop_map(|(codec, digest)| Cid::new(codec, Blake3Hash(digest)))
}

/// Generate a version that ships a bundle.
pub fn bundle_version() -> impl Strategy<Value = Version> {
    (8u32..64).prop_map(Version)
}

/// Generate block contents of specified max length.
pub fn block(max_len: usize) -> impl Strategy<Value = Block> {
    (codec(), prop::collection::vec(any::<u8>(), 0..=max_len))
        .prop_map(|(codec, data)| Block::new(codec, data))
}

/// Parameters for generating an archive.
#[derive(Debug, Clone)]
pub struct ArchiveParams {
    pub roots: Vec<Cid>,
    pub blocks: Vec<Block>,
}

impl ArchiveParams {
    pub fn encode(&self) -> Vec<u8> {
        self.roots
            .iter()
            .fold(FixtureArchive::new(), |archive, root| archive.root(*root))
            .blocks(&self.blocks)
            .encode()
    }
}

/// Generate an archive with between `min_roots` and `max_roots` roots.
pub fn archive(min_roots: usize, max_roots: usize) -> impl Strategy<Value = ArchiveParams> {
    (
        prop::collection::vec(cid(), min_roots..=max_roots),
        prop::collection::vec(block(64), 0..4),
    )
        .prop_map(|(roots, blocks)| ArchiveParams { roots, blocks })
}

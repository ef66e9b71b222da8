//! A minimal archive format for tests.
//!
//! The wire form is a single CBOR map:
//!
//! ```text
//! { "roots": [bytes, ...], "blocks": [{ "cid": bytes, "data": bytes }, ...] }
//! ```
//!
//! Blocks carry their cid explicitly so a test can write a block whose bytes
//! do not hash to its cid and watch the decoder fail part-way through.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};

use bundle_loader::{ArchiveDecoder, DecodeError, DecodeResult};
use bundle_loader_core::{ArchiveHeader, Block, Cid};
use bundle_loader_store::Blockstore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct WireArchive {
    roots: Vec<Vec<u8>>,
    blocks: Vec<WireBlock>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireBlock {
    cid: Vec<u8>,
    data: Vec<u8>,
}

/// Builder for fixture archives.
#[derive(Debug, Default)]
pub struct FixtureArchive {
    wire: WireArchive,
}

impl FixtureArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a root. Roots need not refer to blocks in the archive.
    pub fn root(mut self, cid: Cid) -> Self {
        self.wire.roots.push(cid.to_bytes().to_vec());
        self
    }

    pub fn block(mut self, block: &Block) -> Self {
        self.wire.blocks.push(WireBlock {
            cid: block.cid().to_bytes().to_vec(),
            data: block.data().to_vec(),
        });
        self
    }

    pub fn blocks<'a>(self, blocks: impl IntoIterator<Item = &'a Block>) -> Self {
        blocks.into_iter().fold(self, |archive, block| archive.block(block))
    }

    /// Add a block whose data does not match `cid`.
    pub fn corrupt_block(mut self, cid: Cid, data: &[u8]) -> Self {
        self.wire.blocks.push(WireBlock {
            cid: cid.to_bytes().to_vec(),
            data: data.to_vec(),
        });
        self
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        ciborium::into_writer(&self.wire, &mut buf).expect("encode fixture archive");
        buf
    }
}

/// Decodes [`FixtureArchive`] bytes, writing blocks in archive order.
///
/// Counts how many times it has been asked to decode, so tests can check
/// that a source was never read.
#[derive(Debug, Default)]
pub struct FixtureDecoder {
    decodes: AtomicUsize,
}

impl FixtureDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArchiveDecoder for FixtureDecoder {
    async fn decode(
        &self,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        store: &dyn Blockstore,
    ) -> DecodeResult<ArchiveHeader> {
        self.decodes.fetch_add(1, Ordering::SeqCst);

        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;

        let wire: WireArchive = ciborium::from_reader(buf.as_slice())
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;

        let roots = wire
            .roots
            .iter()
            .map(|root| Cid::from_bytes(root))
            .collect::<Result<Vec<_>, _>>()?;

        for wire_block in wire.blocks {
            let cid = Cid::from_bytes(&wire_block.cid)?;
            let block = Block::from_parts(cid, wire_block.data)?;
            store.put(&block).await?;
        }

        Ok(ArchiveHeader::new(roots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundle_loader_core::Codec;
    use bundle_loader_store::MemoryBlockstore;

    #[tokio::test]
    async fn test_decode_writes_blocks() {
        let block = Block::new(Codec::DagCbor, &b"root node"[..]);
        let bytes = FixtureArchive::new().root(*block.cid()).block(&block).encode();

        let store = MemoryBlockstore::new();
        let decoder = FixtureDecoder::new();
        let header = decoder.decode(&mut bytes.as_slice(), &store).await.unwrap();

        assert_eq!(header.roots, vec![*block.cid()]);
        assert!(store.has(block.cid()).await.unwrap());
        assert_eq!(decoder.decode_count(), 1);
    }

    #[tokio::test]
    async fn test_truncated_is_malformed() {
        let block = Block::new(Codec::Raw, &b"data"[..]);
        let bytes = FixtureArchive::new().root(*block.cid()).block(&block).encode();
        let truncated = &bytes[..bytes.len() / 2];

        let err = FixtureDecoder::new()
            .decode(&mut &truncated[..], &MemoryBlockstore::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_corrupt_block_keeps_earlier_writes() {
        let good = Block::new(Codec::Raw, &b"good"[..]);
        let claimed = Cid::of(Codec::Raw, b"expected");
        let bytes = FixtureArchive::new()
            .root(*good.cid())
            .block(&good)
            .corrupt_block(claimed, b"actual")
            .encode();

        let store = MemoryBlockstore::new();
        let err = FixtureDecoder::new()
            .decode(&mut bytes.as_slice(), &store)
            .await
            .unwrap_err();

        assert!(matches!(err, DecodeError::Block(_)));
        assert!(store.has(good.cid()).await.unwrap());
        assert!(!store.has(&claimed).await.unwrap());
    }
}

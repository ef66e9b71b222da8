//! Archive decoder abstraction.
//!
//! The container format itself lives outside this crate. A decoder reads a
//! serialized archive, writes every block it contains into the store as it
//! goes, and hands back the archive's root list.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use bundle_loader_core::ArchiveHeader;
use bundle_loader_store::Blockstore;

use crate::error::DecodeError;

/// Result type for decode operations.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Decodes a serialized archive into a block store.
///
/// Blocks written before a decode failure stay in the store. That is
/// harmless: writes are content-addressed, so a later successful load of the
/// same archive converges on the same state.
#[async_trait]
pub trait ArchiveDecoder: Send + Sync {
    /// Read the whole archive from `reader`, writing its blocks to `store`.
    async fn decode(
        &self,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        store: &dyn Blockstore,
    ) -> DecodeResult<ArchiveHeader>;
}

#[async_trait]
impl<D: ArchiveDecoder + ?Sized> ArchiveDecoder for Arc<D> {
    async fn decode(
        &self,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        store: &dyn Blockstore,
    ) -> DecodeResult<ArchiveHeader> {
        (**self).decode(reader, store).await
    }
}

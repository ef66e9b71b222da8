//! Single-archive loading.
//!
//! A bundle represents exactly one manifest tree, so a loaded archive must
//! declare exactly one root. Anything else is rejected after decoding.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncRead, BufReader};

use bundle_loader_core::Cid;
use bundle_loader_store::Blockstore;

use crate::decoder::ArchiveDecoder;
use crate::error::LoadError;

/// Loads one archive into a store and returns its root.
#[derive(Debug, Clone)]
pub struct BundleLoader<D> {
    decoder: D,
}

impl<D: ArchiveDecoder> BundleLoader<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    /// Decode an archive from a byte stream into `store`.
    ///
    /// On success every block in the archive is in the store and the single
    /// root is returned.
    pub async fn load<R>(&self, store: &dyn Blockstore, mut reader: R) -> Result<Cid, LoadError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let header = self
            .decoder
            .decode(&mut reader, store)
            .await
            .map_err(LoadError::Decode)?;

        header
            .single_root()
            .ok_or(LoadError::RootCount(header.roots.len()))
    }

    /// Open the archive at `path` and load it.
    ///
    /// The file is closed when this returns, whatever the outcome.
    pub async fn load_file(
        &self,
        store: &dyn Blockstore,
        path: impl AsRef<Path>,
    ) -> Result<Cid, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).await.map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        self.load(store, BufReader::new(file)).await
    }
}

//! Single-archive loading against the fixture archive format.

use proptest::prelude::*;

use bundle_loader::store::{Blockstore, MemoryBlockstore, SqliteBlockstore};
use bundle_loader::{Block, BundleLoader, Cid, Codec, DecodeError, LoadError, Version};
use bundle_loader_testkit::generators::archive;
use bundle_loader_testkit::{manifest_bundle, FixtureArchive, FixtureDecoder};

fn loader() -> BundleLoader<FixtureDecoder> {
    BundleLoader::new(FixtureDecoder::new())
}

#[tokio::test]
async fn test_load_returns_single_root() {
    let bundle = manifest_bundle(Version(8), 3);
    let store = MemoryBlockstore::new();

    let root = loader().load(&store, bundle.bytes.as_slice()).await.unwrap();

    assert_eq!(root, bundle.root);
    for block in &bundle.blocks {
        assert!(store.has(block.cid()).await.unwrap());
    }
    assert_eq!(store.len().await.unwrap(), bundle.blocks.len());
}

#[tokio::test]
async fn test_zero_roots_rejected() {
    let block = Block::new(Codec::Raw, &b"orphan"[..]);
    let bytes = FixtureArchive::new().block(&block).encode();

    let err = loader()
        .load(&MemoryBlockstore::new(), bytes.as_slice())
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::RootCount(0)));
    assert_eq!(
        err.to_string(),
        "expected one root when loading bundle, got 0"
    );
}

#[tokio::test]
async fn test_two_roots_rejected() {
    let a = Block::new(Codec::DagCbor, &b"a"[..]);
    let b = Block::new(Codec::DagCbor, &b"b"[..]);
    let bytes = FixtureArchive::new()
        .root(*a.cid())
        .root(*b.cid())
        .block(&a)
        .block(&b)
        .encode();

    let err = loader()
        .load(&MemoryBlockstore::new(), bytes.as_slice())
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::RootCount(2)));
}

#[tokio::test]
async fn test_malformed_archive() {
    let err = loader()
        .load(&MemoryBlockstore::new(), &b"definitely not cbor"[..])
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::Decode(DecodeError::Malformed(_))));
    assert!(err.to_string().starts_with("error loading bundle: "));
}

#[tokio::test]
async fn test_failed_decode_keeps_written_blocks() {
    let good = Block::new(Codec::Raw, &b"written first"[..]);
    let bytes = FixtureArchive::new()
        .root(*good.cid())
        .block(&good)
        .corrupt_block(Cid::of(Codec::Raw, b"claimed"), b"actual")
        .encode();
    let store = MemoryBlockstore::new();

    let err = loader().load(&store, bytes.as_slice()).await.unwrap_err();

    assert!(matches!(err, LoadError::Decode(DecodeError::Block(_))));
    assert!(store.has(good.cid()).await.unwrap());
}

#[tokio::test]
async fn test_load_file() {
    let bundle = manifest_bundle(Version(9), 2);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v9.car");
    std::fs::write(&path, &bundle.bytes).unwrap();

    let store = MemoryBlockstore::new();
    let root = loader().load_file(&store, &path).await.unwrap();

    assert_eq!(root, bundle.root);
    assert!(store.has(&bundle.root).await.unwrap());
}

#[tokio::test]
async fn test_load_missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.car");

    let err = loader()
        .load_file(&MemoryBlockstore::new(), &path)
        .await
        .unwrap_err();

    match &err {
        LoadError::Open { path: p, source } => {
            assert_eq!(p, &path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("missing.car"));
}

#[tokio::test]
async fn test_load_into_sqlite() {
    let bundle = manifest_bundle(Version(8), 2);
    let store = SqliteBlockstore::open_memory().unwrap();

    let root = loader().load(&store, bundle.bytes.as_slice()).await.unwrap();

    assert_eq!(root, bundle.root);
    assert_eq!(store.len().await.unwrap(), bundle.blocks.len());
}

proptest! {
    #[test]
    fn root_count_other_than_one_never_yields_root(params in archive(0, 4)) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let bytes = params.encode();

        let result = rt.block_on(loader().load(&MemoryBlockstore::new(), bytes.as_slice()));

        if params.roots.len() == 1 {
            prop_assert_eq!(result.unwrap(), params.roots[0]);
        } else {
            let is_root_count = matches!(result, Err(LoadError::RootCount(n)) if n == params.roots.len());
            prop_assert!(is_root_count);
        }
    }
}

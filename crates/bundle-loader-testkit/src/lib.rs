//! # Bundle Loader Testkit
//!
//! Testing utilities for the bundle loader.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixture archives**: a small CBOR container and a decoder for it, so the
//!   loader can be exercised without a production archive format
//! - **Fixtures**: deterministic manifest bundles and a [`TestFixture`] that
//!   wires a memory store, registry, catalogue, and environment together
//! - **Generators**: Proptest strategies for cids, blocks, and archives
//!
//! ## Test Fixtures
//!
//! ```rust
//! use bundle_loader_core::Version;
//! use bundle_loader_testkit::TestFixture;
//!
//! let mut fixture = TestFixture::new();
//! let bundle = fixture.with_embedded_bundle(Version(8));
//! assert_eq!(fixture.manifests.get(Version(8)), Some(bundle.root));
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use bundle_loader_testkit::generators::archive;
//!
//! proptest! {
//!     #[test]
//!     fn encodes(params in archive(0, 3)) {
//!         prop_assert!(!params.encode().is_empty());
//!     }
//! }
//! ```

pub mod archive;
pub mod fixtures;
pub mod generators;

pub use archive::{FixtureArchive, FixtureDecoder};
pub use fixtures::{manifest_bundle, ManifestBundle, TestFixture};
pub use generators::ArchiveParams;

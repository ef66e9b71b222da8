//! The manifest registry: expected root per version.
//!
//! Built once at start-up, then shared read-only (typically behind an `Arc`).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use bundle_loader_core::{Cid, Version};

use crate::config::read_json;
use crate::error::ConfigError;

/// Maps each version to the root cid its bundle must have.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestRegistry {
    manifests: BTreeMap<Version, Cid>,
}

impl ManifestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_manifest(mut self, version: Version, manifest: Cid) -> Self {
        self.register(version, manifest);
        self
    }

    /// Register the manifest for `version`, returning any previous entry.
    pub fn register(&mut self, version: Version, manifest: Cid) -> Option<Cid> {
        self.manifests.insert(version, manifest)
    }

    pub fn get(&self, version: Version) -> Option<Cid> {
        self.manifests.get(&version).copied()
    }

    /// Registered versions in ascending order.
    pub fn versions(&self) -> impl Iterator<Item = Version> + '_ {
        self.manifests.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.manifests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }

    /// Parse `{"<version>": "<cid>", ...}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_json(path.as_ref())
    }
}

impl FromIterator<(Version, Cid)> for ManifestRegistry {
    fn from_iter<I: IntoIterator<Item = (Version, Cid)>>(iter: I) -> Self {
        Self {
            manifests: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundle_loader_core::Codec;

    #[test]
    fn test_lookup() {
        let r8 = Cid::of(Codec::DagCbor, b"v8");
        let registry = ManifestRegistry::new().with_manifest(Version(8), r8);

        assert_eq!(registry.get(Version(8)), Some(r8));
        assert_eq!(registry.get(Version(9)), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ManifestRegistry::new();
        let a = Cid::of(Codec::DagCbor, b"a");
        let b = Cid::of(Codec::DagCbor, b"b");

        assert_eq!(registry.register(Version(8), a), None);
        assert_eq!(registry.register(Version(8), b), Some(a));
        assert_eq!(registry.get(Version(8)), Some(b));
    }

    #[test]
    fn test_from_json() {
        let r8 = Cid::of(Codec::DagCbor, b"v8");
        let r9 = Cid::of(Codec::DagCbor, b"v9");
        let json = format!(r#"{{"9": "{}", "8": "{}"}}"#, r9, r8);

        let registry = ManifestRegistry::from_json(&json).unwrap();
        assert_eq!(registry.get(Version(8)), Some(r8));
        assert_eq!(registry.get(Version(9)), Some(r9));
        assert_eq!(
            registry.versions().collect::<Vec<_>>(),
            vec![Version(8), Version(9)]
        );
    }

    #[test]
    fn test_from_json_rejects_bad_cid() {
        let err = ManifestRegistry::from_json(r#"{"8": "nope"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_missing_file() {
        let err = ManifestRegistry::from_file("/nonexistent/manifests.json").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/manifests.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

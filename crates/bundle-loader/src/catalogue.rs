//! The release catalogue: where each version's bundle can be found.
//!
//! Each entry maps network names to on-disk bundle paths and may carry an
//! embedded copy of the bundle compiled into the binary. Paths come from
//! configuration; embedded payloads are attached in code.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use bundle_loader_core::Version;

use crate::config::read_json;
use crate::error::ConfigError;

/// Release information for one version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    /// Bundle path per network name.
    #[serde(default)]
    pub paths: BTreeMap<String, PathBuf>,

    #[serde(skip)]
    embedded: Option<Bytes>,
}

impl ReleaseEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, network: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(network.into(), path.into());
        self
    }

    pub fn with_embedded(mut self, bundle: impl Into<Bytes>) -> Self {
        self.set_embedded(bundle);
        self
    }

    pub fn set_embedded(&mut self, bundle: impl Into<Bytes>) {
        self.embedded = Some(bundle.into());
    }

    /// The bundle path for `network`, if one is set and non-empty.
    pub fn path(&self, network: &str) -> Option<&Path> {
        self.paths
            .get(network)
            .map(PathBuf::as_path)
            .filter(|p| !p.as_os_str().is_empty())
    }

    pub fn embedded(&self) -> Option<&Bytes> {
        self.embedded.as_ref()
    }
}

/// Release entries keyed by version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseCatalogue {
    releases: BTreeMap<Version, ReleaseEntry>,
}

impl ReleaseCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_release(mut self, version: Version, entry: ReleaseEntry) -> Self {
        self.releases.insert(version, entry);
        self
    }

    /// Attach an embedded bundle, creating the entry if needed.
    pub fn with_embedded(mut self, version: Version, bundle: impl Into<Bytes>) -> Self {
        self.release_mut(version).set_embedded(bundle);
        self
    }

    /// The entry for `version`, created empty if missing.
    pub fn release_mut(&mut self, version: Version) -> &mut ReleaseEntry {
        self.releases.entry(version).or_default()
    }

    pub fn get(&self, version: Version) -> Option<&ReleaseEntry> {
        self.releases.get(&version)
    }

    pub fn versions(&self) -> impl Iterator<Item = Version> + '_ {
        self.releases.keys().copied()
    }

    /// Parse `{"<version>": {"paths": {"<network>": "<path>"}}, ...}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_json(path.as_ref())
    }
}

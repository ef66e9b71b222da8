//! Loader configuration.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use bundle_loader_core::Version;

use crate::env::EnvLookup;
use crate::error::ConfigError;

/// Variable naming the network whose catalogue paths are used.
pub const NETWORK_VAR: &str = "BUNDLE_LOADER_NETWORK";

pub const DEFAULT_NETWORK: &str = "mainnet";

pub const DEFAULT_OVERRIDE_PREFIX: &str = "BUNDLE_LOADER";

/// Configuration for bundle loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Network name used to pick a path from each release entry.
    pub network: String,
    /// Prefix of the per-version override variables.
    pub override_prefix: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            override_prefix: DEFAULT_OVERRIDE_PREFIX.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Defaults, with the network taken from [`NETWORK_VAR`] when set.
    pub fn from_env(env: &dyn EnvLookup) -> Self {
        let mut config = Self::default();
        if let Some(network) = env
            .var(NETWORK_VAR)
            .and_then(|n| n.into_string().ok())
            .filter(|n| !n.is_empty())
        {
            config.network = network;
        }
        config
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_json(path.as_ref())
    }

    /// Name of the variable that overrides the bundle path for `version`,
    /// e.g. `BUNDLE_LOADER_V8_BUNDLE`.
    pub fn override_var(&self, version: Version) -> String {
        format!("{}_V{}_BUNDLE", self.override_prefix, version.get())
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

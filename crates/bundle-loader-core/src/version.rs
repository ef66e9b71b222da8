//! Manifest family versions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A generation of the manifest family.
///
/// Serialized as a bare integer so it can key JSON maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(pub u32);

/// First version that ships as a bundle. Earlier generations have none.
pub const MIN_BUNDLE_VERSION: Version = Version(8);

impl Version {
    pub const fn new(n: u32) -> Self {
        Self(n)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether a bundle exists for this generation at all.
    pub fn has_bundle(self) -> bool {
        self >= MIN_BUNDLE_VERSION
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u32> for Version {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

//! Bundle source resolution.
//!
//! A version's bundle can come from three places, tried in this order:
//!
//! 1. a per-version override variable naming a local file,
//! 2. the release catalogue path for the configured network,
//! 3. a bundle embedded in the binary.
//!
//! Each step is a plain function in [`RESOLVERS`]; the first to return a
//! source wins.

use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::catalogue::ReleaseEntry;

/// Where a bundle's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleSource {
    Override(PathBuf),
    Catalogue(PathBuf),
    Embedded(Bytes),
}

/// [`BundleSource`] without its payload, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Override,
    Catalogue,
    Embedded,
}

impl BundleSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            BundleSource::Override(_) => SourceKind::Override,
            BundleSource::Catalogue(_) => SourceKind::Catalogue,
            BundleSource::Embedded(_) => SourceKind::Embedded,
        }
    }

    /// The file path, for file-backed sources.
    pub fn path(&self) -> Option<&Path> {
        match self {
            BundleSource::Override(path) | BundleSource::Catalogue(path) => Some(path.as_path()),
            BundleSource::Embedded(_) => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Override => "override path",
            SourceKind::Catalogue => "catalogue path",
            SourceKind::Embedded => "embedded bundle",
        })
    }
}

impl fmt::Display for BundleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleSource::Override(path) | BundleSource::Catalogue(path) => {
                write!(f, "{} {:?}", self.kind(), path)
            }
            BundleSource::Embedded(bytes) => write!(f, "{} ({} bytes)", self.kind(), bytes.len()),
        }
    }
}

/// Inputs available when choosing a source for one version.
#[derive(Debug, Clone)]
pub struct ResolveContext<'a> {
    /// Value of the version's override variable, if set.
    pub override_path: Option<PathBuf>,
    /// Network whose catalogue path applies.
    pub network: &'a str,
    pub release: &'a ReleaseEntry,
}

/// One step of the resolution chain.
pub type Resolver = fn(&ResolveContext<'_>) -> Option<BundleSource>;

/// Resolution chain, highest priority first.
pub const RESOLVERS: &[Resolver] = &[from_override, from_catalogue, from_embedded];

/// Pick the first available source, or `None` if the version has none.
pub fn resolve(ctx: &ResolveContext<'_>) -> Option<BundleSource> {
    RESOLVERS.iter().find_map(|resolver| resolver(ctx))
}

fn from_override(ctx: &ResolveContext<'_>) -> Option<BundleSource> {
    ctx.override_path
        .as_ref()
        .filter(|path| !path.as_os_str().is_empty())
        .map(|path| BundleSource::Override(path.clone()))
}

fn from_catalogue(ctx: &ResolveContext<'_>) -> Option<BundleSource> {
    ctx.release
        .path(ctx.network)
        .map(|path| BundleSource::Catalogue(path.to_path_buf()))
}

fn from_embedded(ctx: &ResolveContext<'_>) -> Option<BundleSource> {
    ctx.release.embedded().cloned().map(BundleSource::Embedded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(override_path: Option<&str>, release: &'a ReleaseEntry) -> ResolveContext<'a> {
        ResolveContext {
            override_path: override_path.map(PathBuf::from),
            network: "mainnet",
            release,
        }
    }

    #[test]
    fn test_priority_order() {
        let full = ReleaseEntry::new()
            .with_path("mainnet", "/pinned.car")
            .with_embedded(&b"embedded"[..]);

        assert_eq!(
            resolve(&ctx(Some("/override.car"), &full)),
            Some(BundleSource::Override("/override.car".into()))
        );
        assert_eq!(
            resolve(&ctx(None, &full)),
            Some(BundleSource::Catalogue("/pinned.car".into()))
        );

        let embedded_only = ReleaseEntry::new().with_embedded(&b"embedded"[..]);
        assert_eq!(
            resolve(&ctx(None, &embedded_only)),
            Some(BundleSource::Embedded(Bytes::from_static(b"embedded")))
        );
    }

    #[test]
    fn test_empty_values_fall_through() {
        let release = ReleaseEntry::new()
            .with_path("mainnet", "")
            .with_embedded(&b"x"[..]);

        let source = resolve(&ctx(Some(""), &release)).unwrap();
        assert_eq!(source.kind(), SourceKind::Embedded);
    }

    #[test]
    fn test_other_network_path_ignored() {
        let release = ReleaseEntry::new().with_path("calibnet", "/calib.car");
        assert_eq!(resolve(&ctx(None, &release)), None);
    }

    #[test]
    fn test_nothing_available() {
        assert_eq!(resolve(&ctx(None, &ReleaseEntry::new())), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_override_wins() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = PathBuf::from(OsStr::from_bytes(b"/bundles/ov\xff.car"));
        let release = ReleaseEntry::new()
            .with_path("mainnet", "/pinned.car")
            .with_embedded(&b"embedded"[..]);
        let ctx = ResolveContext {
            override_path: Some(path.clone()),
            network: "mainnet",
            release: &release,
        };

        assert_eq!(resolve(&ctx), Some(BundleSource::Override(path)));
    }

    #[test]
    fn test_display() {
        let source = BundleSource::Catalogue("/b.car".into());
        assert_eq!(source.to_string(), r#"catalogue path "/b.car""#);
        assert_eq!(source.path(), Some(Path::new("/b.car")));

        let source = BundleSource::Embedded(Bytes::from_static(b"abc"));
        assert_eq!(source.to_string(), "embedded bundle (3 bytes)");
        assert_eq!(source.path(), None);
    }
}

//! Environment variable lookup.
//!
//! Overrides are read through [`EnvLookup`] rather than `std::env` directly
//! so tests can supply a fixed table.
//!
//! Values are raw OS strings: an override path need not be valid unicode.

use std::collections::HashMap;
use std::ffi::OsString;

/// A source of named variables.
pub trait EnvLookup: Send + Sync {
    /// The value of `name`, or `None` if unset.
    fn var(&self, name: &str) -> Option<OsString>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}

impl EnvLookup for HashMap<String, OsString> {
    fn var(&self, name: &str) -> Option<OsString> {
        self.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_lookup() {
        let mut env = HashMap::new();
        env.insert("A".to_string(), OsString::from("1"));

        assert_eq!(env.var("A"), Some(OsString::from("1")));
        assert_eq!(env.var("B"), None);
    }

    #[test]
    fn test_process_env_unset() {
        assert_eq!(
            ProcessEnv.var("BUNDLE_LOADER_TEST_DEFINITELY_UNSET_VARIABLE"),
            None
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_map_keeps_non_unicode_value() {
        use std::os::unix::ffi::OsStrExt;

        let raw = std::ffi::OsStr::from_bytes(b"/bundles/v\xff.car").to_os_string();
        let mut env = HashMap::new();
        env.insert("V".to_string(), raw.clone());

        assert_eq!(env.var("V"), Some(raw));
    }
}

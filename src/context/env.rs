//! Environment sources.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read-only view over environment variables.
///
/// Unset and empty variables are indistinguishable to the detectors: both read
/// as the empty string.
pub trait EnvSource {
    /// Returns the value of `key`, or `None` when unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns the value of `key`, or `""` when unset.
    fn var(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

//! Key/value sources the hook reads its invocation context from.
//!
//! # Design
//! - The procedure never touches the process environment directly; it receives
//!   an `OptionSource` so tests can supply deterministic contexts.
//! - Sources are read-only for the lifetime of an invocation.

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;

/// Read-only view over the key/value pairs supplied by the host.
pub trait OptionSource {
    /// Raw value stored under `key`. Paths must be read through this so
    /// non-UTF-8 names survive.
    fn get_os(&self, key: &str) -> Option<OsString>;

    /// Value stored under `key` as text, with invalid UTF-8 replaced.
    fn get(&self, key: &str) -> Option<String> {
        self.get_os(key)
            .map(|value| value.to_string_lossy().into_owned())
    }

    /// Whether `key` is present, regardless of its value.
    fn contains(&self, key: &str) -> bool {
        self.get_os(key).is_some()
    }
}

impl<T: OptionSource + ?Sized> OptionSource for &T {
    fn get_os(&self, key: &str) -> Option<OsString> {
        (**self).get_os(key)
    }

    fn contains(&self, key: &str) -> bool {
        (**self).contains(key)
    }
}

/// Source backed by the environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl OptionSource for ProcessEnv {
    fn get_os(&self, key: &str) -> Option<OsString> {
        env::var_os(key)
    }
}

/// In-memory source, used by tests and by callers embedding the hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    values: BTreeMap<String, OsString>,
}

impl MapSource {
    /// Create an empty source.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style removal.
    #[must_use]
    pub fn without(mut self, key: &str) -> Self {
        self.remove(key);
        self
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OsString>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove a value, returning it when present.
    pub fn remove(&mut self, key: &str) -> Option<OsString> {
        self.values.remove(key)
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl OptionSource for MapSource {
    fn get_os(&self, key: &str) -> Option<OsString> {
        self.values.get(key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

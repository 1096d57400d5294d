// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use reel_app_core::config::{ConfigError, ConfigStore};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// In-memory [`ConfigStore`] that records every write.
///
/// Clones share state, so a test can hand one clone to a `ConfigService` and
/// inspect the other.
///
/// # Example
///
/// ```
/// use reel_dry_tests::InMemoryConfigStore;
/// use reel_app_core::config::ConfigService;
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
///
/// service.save("story", &serde_json::json!({"videoNodes": []})).unwrap();
/// assert_eq!(store.writes(), vec!["story".to_string()]);
/// assert!(store.text("story").unwrap().contains("videoNodes"));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: BTreeMap<String, Vec<u8>>,
    writes: Vec<String>,
    loads: usize,
    fail_loads: bool,
    fail_saves: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one blob.
    pub fn with_blob(key: &str, data: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.lock().data.insert(key.to_owned(), data.into());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every subsequent load fail with `ConfigError::Other`.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_loads = fail;
    }

    /// Make every subsequent save fail with `ConfigError::Other`.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    /// Number of `load_raw` attempts, failed ones included.
    pub fn load_count(&self) -> usize {
        self.lock().loads
    }

    /// Keys of successful saves, in call order (repeats included).
    pub fn writes(&self) -> Vec<String> {
        self.lock().writes.clone()
    }

    /// Stored bytes for `key`.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().data.get(key).cloned()
    }

    /// Stored bytes for `key` as UTF-8 text.
    pub fn text(&self, key: &str) -> Option<String> {
        self.raw(key).and_then(|b| String::from_utf8(b).ok())
    }

    /// Overwrite a blob without counting it as a write (simulates an external edit).
    pub fn put(&self, key: &str, data: impl Into<Vec<u8>>) {
        self.lock().data.insert(key.to_owned(), data.into());
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.lock();
        inner.loads += 1;
        if inner.fail_loads {
            return Err(ConfigError::Other("simulated load failure".into()));
        }
        inner.data.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        if inner.fail_saves {
            return Err(ConfigError::Other("simulated save failure".into()));
        }
        inner.data.insert(key.to_owned(), data.to_vec());
        inner.writes.push(key.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_data_and_history() {
        let a = InMemoryConfigStore::new();
        let b = a.clone();
        a.save_raw("k", b"v").unwrap();
        assert_eq!(b.load_raw("k").unwrap(), b"v");
        assert_eq!(b.writes(), vec!["k"]);
        assert_eq!(a.load_count(), 1);
    }

    #[test]
    fn failed_save_leaves_no_trace() {
        let store = InMemoryConfigStore::new();
        store.set_fail_on_save(true);
        assert!(matches!(store.save_raw("k", b"v"), Err(ConfigError::Other(_))));
        assert!(store.writes().is_empty());
        assert_eq!(store.raw("k"), None);
    }

    #[test]
    fn failed_load_is_counted() {
        let store = InMemoryConfigStore::with_blob("k", "v");
        store.set_fail_on_load(true);
        assert!(store.load_raw("k").is_err());
        store.set_fail_on_load(false);
        assert_eq!(store.load_raw("k").unwrap(), b"v");
        assert_eq!(store.load_count(), 2);
    }

    #[test]
    fn put_is_not_a_write() {
        let store = InMemoryConfigStore::new();
        store.put("k", "external");
        assert_eq!(store.text("k").as_deref(), Some("external"));
        assert!(store.writes().is_empty());
        assert!(matches!(store.load_raw("nope"), Err(ConfigError::NotFound)));
    }
}

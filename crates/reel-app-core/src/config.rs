// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port for Reel tools.
//!
//! One port persists both preferences and story files. Each is a JSON blob
//! addressed by a logical key; adapters decide how a key maps onto storage
//! (the filesystem adapter writes `<key>.json`).

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw blob, replacing any previous value.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// Key is empty or would escape the store's namespace.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Check that `key` is a single non-empty segment.
///
/// Keys may contain letters, digits, `-`, `_` and `.`, but never start with a
/// dot, so a key can always be used verbatim as a file stem.
pub fn validate_key(key: &str) -> Result<(), ConfigError> {
    let ok = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidKey(key.to_owned()))
    }
}

/// Serializes values as pretty JSON and delegates storage to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the inner store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Raw bytes for `key`, or `Ok(None)` if missing or empty.
    pub fn load_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, ConfigError> {
        validate_key(key)?;
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(bytes)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Load and deserialize a value for `key`. Returns `Ok(None)` if missing.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        self.load_bytes(key)?
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(ConfigError::from)
    }

    /// Load `key`, falling back to `T::default()` when missing.
    pub fn load_or_default<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// Persist bytes that are already encoded.
    pub fn save_bytes(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        validate_key(key)?;
        self.store.save_raw(key, data)
    }

    /// Serialize (pretty JSON) and persist a value for `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.save_bytes(key, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct CellStore(RefCell<HashMap<String, Vec<u8>>>);

    impl ConfigStore for CellStore {
        fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
            self.0.borrow().get(key).cloned().ok_or(ConfigError::NotFound)
        }

        fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
            self.0.borrow_mut().insert(key.to_owned(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn keys_are_single_segments() {
        for good in ["prefs", "story-01", "act_2.draft"] {
            assert!(validate_key(good).is_ok(), "{good}");
        }
        for bad in ["", ".hidden", "../etc", "a/b", "a\\b", "space key"] {
            assert!(
                matches!(validate_key(bad), Err(ConfigError::InvalidKey(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn missing_and_empty_load_as_none() {
        let svc = ConfigService::new(CellStore::default());
        assert_eq!(svc.load::<u32>("absent").unwrap(), None);
        svc.save_bytes("blank", b"").unwrap();
        assert_eq!(svc.load::<u32>("blank").unwrap(), None);
        assert_eq!(svc.load_or_default::<u32>("blank").unwrap(), 0);
    }

    #[test]
    fn save_writes_pretty_json() {
        let svc = ConfigService::new(CellStore::default());
        svc.save("nums", &vec![1, 2]).unwrap();
        let raw = svc.load_bytes("nums").unwrap().unwrap();
        assert_eq!(String::from_utf8(raw).unwrap(), "[\n  1,\n  2\n]");
        assert_eq!(svc.load::<Vec<i32>>("nums").unwrap(), Some(vec![1, 2]));
    }

    #[test]
    fn invalid_key_never_reaches_store() {
        let svc = ConfigService::new(CellStore::default());
        assert!(matches!(
            svc.save("../escape", &1),
            Err(ConfigError::InvalidKey(_))
        ));
        assert!(svc.store().0.borrow().is_empty());
    }
}

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Key holding the full animal collection as a JSON array.
pub const ANIMALS_KEY: &str = "herdbook.animals";

/// Key holding the logged-in user as a JSON object.
pub const USER_KEY: &str = "herdbook.user";

/// Durable string-keyed storage. Every `set` overwrites the whole value.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Returns Ok(true) if a value was present.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

/// Read and deserialize a JSON value. A value that fails to parse is
/// reported as `Corrupt` rather than treated as missing.
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Serialize `value` as JSON and store it under `key`.
pub fn write_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    store.set(key, &raw)
}

// In-memory implementation for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// In-memory key-value store for testing.
    #[derive(Default)]
    pub struct InMemoryKeyValueStore {
        entries: RwLock<HashMap<String, String>>,
        fail_writes: RwLock<bool>,
    }

    impl InMemoryKeyValueStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent `set`/`remove` fail, to exercise error paths.
        pub fn fail_writes(&self, fail: bool) {
            *self.fail_writes.write().unwrap() = fail;
        }

        fn check_writable(&self) -> Result<(), StorageError> {
            if *self.fail_writes.read().unwrap() {
                return Err(StorageError::Database("write rejected".to_string()));
            }
            Ok(())
        }
    }

    impl KeyValueStore for InMemoryKeyValueStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.read().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.check_writable()?;
            self.entries
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<bool, StorageError> {
            self.check_writable()?;
            Ok(self.entries.write().unwrap().remove(key).is_some())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_set_get_remove() {
            let store = InMemoryKeyValueStore::new();

            assert_eq!(store.get("k").unwrap(), None);
            store.set("k", "v1").unwrap();
            store.set("k", "v2").unwrap();
            assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));

            assert!(store.remove("k").unwrap());
            assert!(!store.remove("k").unwrap());
        }

        #[test]
        fn test_read_json_corrupt() {
            let store = InMemoryKeyValueStore::new();
            store.set("k", "{not json").unwrap();

            let result: Result<Option<Vec<u32>>, _> = read_json(&store, "k");
            assert!(matches!(result, Err(StorageError::Corrupt { .. })));
        }

        #[test]
        fn test_json_round_trip() {
            let store = InMemoryKeyValueStore::new();
            write_json(&store, "k", &vec![1u32, 2, 3]).unwrap();

            let back: Option<Vec<u32>> = read_json(&store, "k").unwrap();
            assert_eq!(back, Some(vec![1, 2, 3]));
        }

        #[test]
        fn test_failing_writes() {
            let store = InMemoryKeyValueStore::new();
            store.fail_writes(true);
            assert!(store.set("k", "v").is_err());
        }
    }
}

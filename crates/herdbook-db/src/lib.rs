//! Herdbook DB - redb implementation of the key-value storage trait.

pub mod kv_store;
pub mod tables;

pub use kv_store::RedbKeyValueStore;

use std::path::Path;
use std::sync::Arc;

use redb::Database;

use herdbook_core::StorageError;

/// Initialize a database with all required tables.
pub fn init_database(path: impl AsRef<Path>) -> Result<Arc<Database>, StorageError> {
    let db = Database::create(path).map_err(|e| StorageError::Database(e.to_string()))?;

    RedbKeyValueStore::init_tables(&db)?;

    Ok(Arc::new(db))
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdbook_core::KeyValueStore;
    use tempfile::tempdir;

    #[test]
    fn test_init_database() {
        let dir = tempdir().unwrap();
        let db = init_database(dir.path().join("test.redb")).unwrap();

        let store = RedbKeyValueStore::new(db);
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_init_database_is_reentrant() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.redb");

        {
            let db = init_database(&path).unwrap();
            RedbKeyValueStore::new(db).set("k", "v").unwrap();
        }

        let db = init_database(&path).unwrap();
        assert_eq!(
            RedbKeyValueStore::new(db).get("k").unwrap(),
            Some("v".to_string())
        );
    }
}

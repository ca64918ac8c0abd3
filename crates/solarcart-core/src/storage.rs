//! Local persistent key-value storage for the cart.
//!
//! The storefront keeps its cart in the browser's localStorage: one key,
//! one JSON string. This module provides the same shape on top of redb,
//! plus an in-memory backend for tests and embedding.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use redb::{Database, ReadableTable, TableDefinition};

use crate::error::CartError;

// Table definitions
const LOCAL_STORAGE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("local_storage");

/// Raw key-value access used by the cart store.
///
/// Values are opaque bytes; the store decides how to encode them.
pub trait CartBackend: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CartError>;

    /// Overwrite the value stored under `key`.
    fn write_raw(&self, key: &str, value: &[u8]) -> Result<(), CartError>;

    /// Remove `key` if present.
    fn delete_raw(&self, key: &str) -> Result<(), CartError>;
}

/// Storage layer using redb for ACID-compliant persistence
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// This will:
    /// - Create the database directory if it doesn't exist
    /// - Initialize the database file
    /// - Create the key-value table
    pub fn new(path: impl AsRef<Path>) -> Result<Self, CartError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
        })
    }
}

impl CartBackend for Storage {
    fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CartError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORAGE_TABLE)?;

        Ok(table.get(key)?.map(|v| v.value().to_vec()))
    }

    fn write_raw(&self, key: &str, value: &[u8]) -> Result<(), CartError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn delete_raw(&self, key: &str) -> Result<(), CartError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// Volatile backend holding values in process memory.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartBackend for MemoryStorage {
    fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CartError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write_raw(&self, key: &str, value: &[u8]) -> Result<(), CartError> {
        self.entries.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete_raw(&self, key: &str) -> Result<(), CartError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.redb");
        let storage = Storage::new(&db_path).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_storage_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested/path/to/test.redb");
        let storage = Storage::new(&db_path);
        assert!(storage.is_ok());
        assert!(db_path.exists());
    }

    #[test]
    fn test_read_missing_key() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.read_raw("solarpro_cart").unwrap().is_none());
    }

    #[test]
    fn test_write_overwrites_previous_value() {
        let (storage, _temp) = create_test_storage();

        storage.write_raw("solarpro_cart", b"[1]").unwrap();
        storage.write_raw("solarpro_cart", b"[2]").unwrap();

        assert_eq!(
            storage.read_raw("solarpro_cart").unwrap().unwrap(),
            b"[2]".to_vec()
        );
    }

    #[test]
    fn test_delete_key() {
        let (storage, _temp) = create_test_storage();

        storage.write_raw("solarpro_cart", b"[]").unwrap();
        storage.delete_raw("solarpro_cart").unwrap();
        assert!(storage.read_raw("solarpro_cart").unwrap().is_none());

        // Deleting an absent key is not an error
        storage.delete_raw("solarpro_cart").unwrap();
    }

    #[test]
    fn test_value_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.redb");

        {
            let storage = Storage::new(&db_path).unwrap();
            storage.write_raw("solarpro_cart", b"persisted").unwrap();
        }

        {
            let storage = Storage::new(&db_path).unwrap();
            let loaded = storage.read_raw("solarpro_cart").unwrap().unwrap();
            assert_eq!(loaded, b"persisted".to_vec());
        }
    }

    #[test]
    fn test_memory_storage_shares_state_between_clones() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();

        storage.write_raw("k", b"v").unwrap();
        assert_eq!(clone.read_raw("k").unwrap().unwrap(), b"v".to_vec());
    }
}

//! redb-based persistence gateway
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `state` | collection name | JSON blob | menu / orders / tables / sales / session |
//!
//! Values are plain JSON with no schema tag, so a blob written by an older
//! build (or by hand) is read back as-is.
//!
//! # Durability
//!
//! redb commits are durable once `commit()` returns (copy-on-write with an
//! atomic root swap). [`StateStorage::commit_blobs`] writes every collection
//! of a mutation in ONE write transaction: after a crash either all of them
//! reflect the mutation or none do.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Key → JSON blob
const STATE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("state");

pub const KEY_MENU: &str = "menu";
pub const KEY_ORDERS: &str = "orders";
pub const KEY_TABLES: &str = "tables";
pub const KEY_SALES: &str = "sales";
pub const KEY_SESSION: &str = "session";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Namespaced key → JSON blob store backed by redb
#[derive(Clone)]
pub struct StateStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for StateStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStorage").finish_non_exhaustive()
    }
}

impl StateStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(STATE_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    // ========== Raw blobs ==========

    /// Read a raw blob
    pub fn get_blob(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STATE_TABLE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_vec());
        Ok(value)
    }

    /// Write a single blob in its own transaction
    pub fn put_blob(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.commit_blobs(&[(key, value.to_vec())])
    }

    /// Write several blobs atomically
    pub fn commit_blobs(&self, entries: &[(&str, Vec<u8>)]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(STATE_TABLE)?;
            for (key, value) in entries {
                table.insert(*key, value.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove a blob; returns whether it existed
    pub fn remove(&self, key: &str) -> StorageResult<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(STATE_TABLE)?;
            table.remove(key)?.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }

    // ========== JSON helpers ==========

    /// Read and decode a JSON value.
    ///
    /// A blob that does not decode (corrupt, hand-edited, `null`, wrong shape)
    /// is reported as absent so the caller falls back to its default.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let Some(bytes) = self.get_blob(key)? else {
            return Ok(None);
        };
        match serde_json::from_slice::<T>(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Malformed persisted value, treating as absent");
                Ok(None)
            }
        }
    }

    /// Encode and write a single JSON value
    pub fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.put_blob(key, &bytes)
    }
}

/// Encode a value for [`StateStorage::commit_blobs`]
pub fn encode<'k, T: Serialize + ?Sized>(key: &'k str, value: &T) -> StorageResult<(&'k str, Vec<u8>)> {
    Ok((key, serde_json::to_vec(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_missing_key_is_none() {
        let storage = StateStorage::open_in_memory().unwrap();
        assert!(storage.get_blob(KEY_MENU).unwrap().is_none());
        assert!(storage.load_json::<Vec<u32>>(KEY_ORDERS).unwrap().is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let storage = StateStorage::open_in_memory().unwrap();
        let mut value = BTreeMap::new();
        value.insert(3u32, "occupied".to_string());
        storage.save_json(KEY_TABLES, &value).unwrap();

        let loaded: BTreeMap<u32, String> = storage.load_json(KEY_TABLES).unwrap().unwrap();
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_malformed_blob_is_absent() {
        let storage = StateStorage::open_in_memory().unwrap();
        storage.put_blob(KEY_SALES, b"{not json").unwrap();
        assert!(storage.load_json::<Vec<u32>>(KEY_SALES).unwrap().is_none());

        storage.put_blob(KEY_SALES, b"null").unwrap();
        assert!(storage.load_json::<Vec<u32>>(KEY_SALES).unwrap().is_none());
    }

    #[test]
    fn test_commit_blobs_writes_all_keys() {
        let storage = StateStorage::open_in_memory().unwrap();
        let entries = vec![
            encode(KEY_ORDERS, &vec![1, 2]).unwrap(),
            encode(KEY_SALES, &vec![3]).unwrap(),
        ];
        storage.commit_blobs(&entries).unwrap();

        assert_eq!(storage.load_json::<Vec<i32>>(KEY_ORDERS).unwrap(), Some(vec![1, 2]));
        assert_eq!(storage.load_json::<Vec<i32>>(KEY_SALES).unwrap(), Some(vec![3]));
    }

    #[test]
    fn test_remove() {
        let storage = StateStorage::open_in_memory().unwrap();
        storage.put_blob(KEY_SESSION, b"{}").unwrap();
        assert!(storage.remove(KEY_SESSION).unwrap());
        assert!(!storage.remove(KEY_SESSION).unwrap());
        assert!(storage.get_blob(KEY_SESSION).unwrap().is_none());
    }

    #[test]
    fn test_reopen_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.redb");
        {
            let storage = StateStorage::open(&path).unwrap();
            storage.save_json(KEY_ORDERS, &vec!["a".to_string()]).unwrap();
        }
        let storage = StateStorage::open(&path).unwrap();
        let orders: Vec<String> = storage.load_json(KEY_ORDERS).unwrap().unwrap();
        assert_eq!(orders, vec!["a".to_string()]);
    }
}

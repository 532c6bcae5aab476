use std::path::Path;

use redb::{Database, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("knitflow");

fn storage<E: std::fmt::Display>(e: E) -> KVError {
    KVError::Storage(e.to_string())
}

/// Persistent KVStore backed by redb, one table, one transaction per call.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let db = Database::create(path).map_err(storage)?;

        // Create the table up front so reads on a fresh file don't fail.
        let write_txn = db.begin_write().map_err(storage)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)?;

        debug!("RedbStore: opened {:?}", path);
        Ok(Self { db })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;
        let value = table.get(key).map_err(storage)?;
        Ok(value.map(|v| v.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            table.insert(key, value).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)
    }

    fn invalidate(&self, key: &str) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            table.remove(key).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;

        let mut results = Vec::new();
        for entry in table.range(prefix..).map_err(storage)? {
            let (key, value) = entry.map_err(storage)?;
            let key = key.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key, value.value().to_vec()));
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_invalidate() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&tmp.path().join("kv.redb")).unwrap();

        store.set("access:role:qc", b"[1]").unwrap();
        assert_eq!(store.get("access:role:qc").unwrap(), Some(b"[1]".to_vec()));

        store.set("access:role:qc", b"[2]").unwrap();
        assert_eq!(store.get("access:role:qc").unwrap(), Some(b"[2]".to_vec()));

        store.invalidate("access:role:qc").unwrap();
        assert_eq!(store.get("access:role:qc").unwrap(), None);
        store.invalidate("access:role:qc").unwrap();
    }

    #[test]
    fn test_scan_stops_at_prefix_end() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&tmp.path().join("kv.redb")).unwrap();
        store.set("access:role:b", b"b").unwrap();
        store.set("access:role:a", b"a").unwrap();
        store.set("access:rolf", b"z").unwrap();

        let found = store.scan("access:role:").unwrap();
        assert_eq!(
            found,
            vec![
                ("access:role:a".to_string(), b"a".to_vec()),
                ("access:role:b".to_string(), b"b".to_vec()),
            ]
        );
    }

    #[test]
    fn test_reopen_keeps_data() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("kv.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.set("k", b"v").unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"v".to_vec()));
    }
}

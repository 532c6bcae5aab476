use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::KVError;
use crate::traits::KVStore;

/// In-process store backed by a `BTreeMap`. Used by tests and by the
/// server when no data directory is configured.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> KVError {
    KVError::Storage("memory store lock poisoned".into())
}

impl KVStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn invalidate(&self, key: &str) -> Result<(), KVError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut results = Vec::new();
        for (key, value) in entries.range(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key.clone(), value.clone()));
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_invalidate() {
        let store = MemoryStore::new();
        assert_eq!(store.get("access:role:qc").unwrap(), None);

        store.set("access:role:qc", b"{}").unwrap();
        assert_eq!(store.get("access:role:qc").unwrap(), Some(b"{}".to_vec()));

        store.invalidate("access:role:qc").unwrap();
        assert_eq!(store.get("access:role:qc").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalidate_missing_key() {
        let store = MemoryStore::new();
        store.invalidate("nope").unwrap();
    }

    #[test]
    fn test_scan_prefix_sorted() {
        let store = MemoryStore::new();
        store.set("access:role:weaver", b"2").unwrap();
        store.set("access:role:admin", b"1").unwrap();
        store.set("accessory", b"x").unwrap();
        store.set("production:last", b"y").unwrap();

        let keys: Vec<String> = store
            .scan("access:role:")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["access:role:admin", "access:role:weaver"]);
    }
}

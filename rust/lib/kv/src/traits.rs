use crate::error::KVError;

/// Key-value store behind every cached or persisted value in knitflow.
///
/// Keys are namespaced with colons, e.g. `access:role:supervisor`.
/// The calculation engines never touch a store; only the services
/// wrapped around them do.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Drop a key. Invalidating a missing key is not an error.
    fn invalidate(&self, key: &str) -> Result<(), KVError>;

    /// All `(key, value)` pairs whose key starts with `prefix`, sorted by key.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;
}

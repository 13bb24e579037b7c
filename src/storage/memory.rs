use std::collections::HashMap;

use super::{Store, StoreError};

/// A store holding blobs in memory; nothing outlives the process.
///
/// Used by tests and benchmarks, and handy for ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-loads a blob, as if a previous session had written it.
    pub fn preload(&mut self, key: &str, blob: &str) {
        self.blobs.insert(key.to_string(), blob.to_string());
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStore, Store};

    #[test]
    fn absent_key_reads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.read("providers").unwrap(), None);
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut store = MemoryStore::new();
        store.write("providers", "[]").unwrap();
        assert_eq!(store.read("providers").unwrap().as_deref(), Some("[]"));
    }
}

//! The generic persisted collection.
//!
//! A [`Collection`] holds every record of one entity kind in memory, keyed
//! by id, and mirrors the full set to the backing store under the kind's
//! fixed key. Writes always replace the whole blob; there are no
//! incremental updates.

use serde::{Serialize, de::DeserializeOwned};

use super::{Store, StoreError};
use crate::domain::Entity;

/// All records of one entity kind, synchronized with one store key.
///
/// Insertion order is preserved; list views sort copies and rely on the
/// original order for ties.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T: Entity + Serialize + DeserializeOwned + Clone> Collection<T> {
    /// Loads the collection from the store, or installs `seed` on a cold
    /// start (absent key).
    ///
    /// Seeded records stay in memory until the first mutation persists them.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read, or if the stored blob does not
    /// deserialize — a malformed blob is fatal to initialization; there is
    /// no migration path.
    pub fn load_or_seed<S: Store>(
        store: &S,
        seed: impl FnOnce() -> Vec<T>,
    ) -> Result<Self, LoadError> {
        let records = match store.read(T::COLLECTION)? {
            Some(blob) => serde_json::from_str(&blob).map_err(|source| LoadError::Corrupt {
                key: T::COLLECTION,
                source,
            })?,
            None => {
                tracing::info!("cold start: seeding '{}'", T::COLLECTION);
                seed()
            }
        };
        Ok(Self { records })
    }

    /// Serializes the full record set and overwrites the stored blob.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be written to.
    pub fn persist<S: Store>(&self, store: &mut S) -> Result<(), StoreError> {
        let blob = serde_json::to_string_pretty(&self.records).expect("records serialize to JSON");
        store.write(T::COLLECTION, &blob)
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Whether a record with the given id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Inserts the record, or replaces the stored record carrying the same
    /// id.
    pub fn upsert(&mut self, record: T) {
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
    }

    /// Removes the record with the given id, returning whether one was
    /// present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        self.records.len() != before
    }

    /// Iterates the records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Failure to initialize a collection from the store.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The backing store could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The stored blob is not a valid JSON array of records.
    #[error("malformed blob under key '{key}'")]
    Corrupt {
        /// The collection key whose blob failed to parse.
        key: &'static str,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::{Collection, LoadError};
    use crate::{
        domain::{Provider, Specialty},
        storage::{MemoryStore, Store as _},
    };

    fn provider(id: &str, name: &str) -> Provider {
        Provider {
            id: id.to_string(),
            name: name.to_string(),
            specialty: Specialty::Orthodontics,
            email: "ana.lopez@clinica.com".to_string(),
        }
    }

    fn seed() -> Vec<Provider> {
        vec![provider("1", "Dra. Ana López")]
    }

    #[test]
    fn cold_start_installs_seed_without_writing() {
        let store = MemoryStore::new();
        let collection = Collection::load_or_seed(&store, seed).unwrap();

        assert_eq!(collection.len(), 1);
        // Seeding is in-memory only; the store stays cold.
        assert!(store.read("providers").unwrap().is_none());
    }

    #[test]
    fn warm_start_parses_the_stored_blob() {
        let mut store = MemoryStore::new();
        let mut collection = Collection::load_or_seed(&store, seed).unwrap();
        collection.upsert(provider("2", "Dr. Roberto Gómez"));
        collection.persist(&mut store).unwrap();

        let reloaded = Collection::<Provider>::load_or_seed(&store, Vec::new).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("2").unwrap().name, "Dr. Roberto Gómez");
    }

    #[test]
    fn corrupt_blob_is_fatal() {
        let mut store = MemoryStore::new();
        store.preload("providers", "not json at all");

        let error = Collection::<Provider>::load_or_seed(&store, Vec::new).unwrap_err();
        assert!(matches!(error, LoadError::Corrupt { key: "providers", .. }));
    }

    #[test]
    fn upsert_replaces_matching_id_in_place() {
        let store = MemoryStore::new();
        let mut collection = Collection::load_or_seed(&store, seed).unwrap();

        collection.upsert(provider("1", "Dra. Ana López de la Vega"));

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("1").unwrap().name, "Dra. Ana López de la Vega");
    }

    #[test]
    fn remove_reports_presence() {
        let store = MemoryStore::new();
        let mut collection = Collection::load_or_seed(&store, seed).unwrap();

        assert!(collection.remove("1"));
        assert!(!collection.remove("1"));
        assert!(collection.is_empty());
    }
}

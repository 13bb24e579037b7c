//! A directory of JSON blobs, one file per key.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::{Store, StoreError};

/// Filesystem-backed store rooted at a directory.
///
/// Each key maps to `<root>/<key>.json`. Blobs written here are visible to
/// any later read of the same directory, including across process restarts.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory this store reads and writes under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.blob_path(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), StoreError> {
        fs::write(self.blob_path(key), blob).map_err(|source| StoreError {
            key: key.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{FileStore, Store};

    #[test]
    fn absent_key_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert!(store.read("providers").unwrap().is_none());
    }

    #[test]
    fn blobs_survive_reopening_the_directory() {
        let tmp = TempDir::new().unwrap();

        let mut store = FileStore::open(tmp.path()).unwrap();
        store.write("patients", "[{\"id\":\"1\"}]").unwrap();
        drop(store);

        let reopened = FileStore::open(tmp.path()).unwrap();
        assert_eq!(
            reopened.read("patients").unwrap().as_deref(),
            Some("[{\"id\":\"1\"}]")
        );
    }

    #[test]
    fn keys_map_to_json_files() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::open(tmp.path()).unwrap();
        store.write("appointments", "[]").unwrap();
        assert!(tmp.path().join("appointments.json").exists());
    }
}

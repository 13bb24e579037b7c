use std::io;

/// A key-value blob store.
///
/// Implementations hold one opaque string blob per key. Reading an absent
/// key is not an error: it signals a cold start to the caller.
pub trait Store {
    /// Reads the blob stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `blob` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be written to.
    fn write(&mut self, key: &str, blob: &str) -> Result<(), StoreError>;
}

/// Failure of the underlying storage medium.
///
/// Storage failures are unrecoverable at the point they occur; callers
/// propagate them rather than retry.
#[derive(Debug, thiserror::Error)]
#[error("storage failure for key '{key}'")]
pub struct StoreError {
    /// The key being accessed when the failure occurred.
    pub key: String,
    /// The underlying I/O error.
    #[source]
    pub source: io::Error,
}

//! Storage ports - the persistence boundary behind the repositories.
//!
//! Adapters report failures through `StorageError`; the repository layer is
//! where those failures get swallowed (logged, degraded to empty), per the
//! availability-over-consistency contract of the stores.

use async_trait::async_trait;
use thiserror::Error;

/// Errors crossing the storage boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Whole-document persistence for one named collection.
///
/// One UTF-8 JSON document per collection key; `save` overwrites the whole
/// document. Callers hold adapters as `Arc<dyn CollectionStore>`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Raw JSON payload for `key`, or `None` when nothing is stored yet.
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the document for `key`.
    async fn save(&self, key: &str, payload: &str) -> Result<(), StorageError>;
}

/// Individual key/value persistence for settings.
///
/// Infallible surface: adapters log their own failures and degrade (`get`
/// returns `None`, `set`/`remove` become no-ops), so one corrupt key can
/// never take the settings store down.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

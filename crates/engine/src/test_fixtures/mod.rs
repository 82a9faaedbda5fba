//! In-memory fakes for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::infrastructure::ports::{CollectionStore, KeyValueStore, StorageError};

/// Collection store that records every save in order and serves the latest
/// payload back on load.
#[derive(Default)]
pub struct RecordingStore {
    saves: Mutex<Vec<(String, String)>>,
    documents: Mutex<HashMap<String, String>>,
}

impl RecordingStore {
    /// Every `(key, payload)` saved so far, in save order.
    pub fn saves(&self) -> Vec<(String, String)> {
        self.saves.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Pre-seed a document, as if a previous run had persisted it.
    pub fn seed(&self, key: &str, payload: &str) {
        if let Ok(mut docs) = self.documents.lock() {
            docs.insert(key.to_string(), payload.to_string());
        }
    }
}

#[async_trait]
impl CollectionStore for RecordingStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .documents
            .lock()
            .ok()
            .and_then(|docs| docs.get(key).cloned()))
    }

    async fn save(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        if let Ok(mut saves) = self.saves.lock() {
            saves.push((key.to_string(), payload.to_string()));
        }
        if let Ok(mut docs) = self.documents.lock() {
            docs.insert(key.to_string(), payload.to_string());
        }
        Ok(())
    }
}

/// In-memory key/value store.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok().and_then(|v| v.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

//! File-backed storage adapters.
//!
//! Documents land in an app-private data directory:
//! - Linux: `~/.local/share/dmscreen/`
//! - macOS: `~/Library/Application Support/io.dmscreen.dmscreen/`
//! - Windows: `C:\Users\<User>\AppData\Roaming\dmscreen\dmscreen\data\`
//!
//! Both adapters accept an explicit base directory for tests.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;

use super::ports::{CollectionStore, KeyValueStore, StorageError};

fn default_data_dir() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("io", "dmscreen", "dmscreen") {
        dirs.data_dir().to_path_buf()
    } else {
        // Fallback to a relative directory if project dirs are unavailable
        PathBuf::from("dmscreen_data")
    }
}

// ============================================================================
// Collection documents
// ============================================================================

/// One `<key>.json` document per collection key.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crashed write never truncates the previous document.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFileStore {
    /// Store under the platform data directory.
    pub fn new() -> Self {
        Self::with_dir(default_data_dir())
    }

    /// Store under an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        tracing::debug!(dir = %dir.display(), "JSON file store initialized");
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl CollectionStore for JsonFileStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn save(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!("{key}.json.tmp"));
        tokio::fs::write(&tmp_path, payload).await?;
        replace_file(&tmp_path, &path).await?;
        Ok(())
    }
}

async fn replace_file(tmp_path: &Path, final_path: &Path) -> io::Result<()> {
    match tokio::fs::remove_file(final_path).await {
        Ok(_) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => {
            let _ = tokio::fs::remove_file(tmp_path).await;
            return Err(error);
        }
    }

    if let Err(error) = tokio::fs::rename(tmp_path, final_path).await {
        let _ = tokio::fs::remove_file(tmp_path).await;
        return Err(error);
    }
    Ok(())
}

// ============================================================================
// Settings key/value files
// ============================================================================

/// One small file per key under `<dir>/settings/`.
///
/// Per-key isolation is the point: a corrupt or unreadable key degrades that
/// one setting to its default instead of invalidating all of them.
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl Default for FileKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileKeyValueStore {
    /// Store under the platform data directory.
    pub fn new() -> Self {
        Self::with_dir(default_data_dir())
    }

    /// Store under an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into().join("settings"),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read settings key");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            tracing::error!(key, error = %e, "failed to create settings directory");
            return;
        }
        if let Err(e) = std::fs::write(self.path_for(key), value) {
            tracing::error!(key, error = %e, "failed to write settings key");
        }
    }

    fn remove(&self, key: &str) {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(key, error = %e, "failed to remove settings key"),
        }
    }
}

//! Infrastructure - storage ports and their file-backed adapters.

pub mod json_file;
pub mod ports;
pub mod write_behind;

pub use json_file::{FileKeyValueStore, JsonFileStore};
pub use ports::{CollectionStore, KeyValueStore, StorageError};
pub use write_behind::WriteBehind;

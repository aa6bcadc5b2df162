#![forbid(unsafe_code)]

pub mod manager;
pub mod repository;
pub mod sqlite;

pub use manager::{ExportBundle, StorageManager};
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};

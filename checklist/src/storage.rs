//! File-backed key-value store.
//!
//! The production persistence collaborator: one JSON document per key,
//! stored as `<dir>/<key>.json`. Documents are read whole and written
//! whole, matching the write-through contract - there are no partial
//! updates to protect.

use checklist_core::kv::{KeyValueStore, StorageError};
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

/// Key-value store writing JSON documents into a directory
///
/// Writes go to a temporary sibling first and are renamed into place, so
/// a crash mid-write never leaves a torn document behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir` (created lazily on first write)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory documents are stored in
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Value>, StorageError>> + Send + 'a>> {
        Box::pin(async move {
            let path = self.document_path(key);
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(key, "No document stored yet");
                    return Ok(None);
                },
                Err(error) => return Err(StorageError::Io(error.to_string())),
            };

            let value = serde_json::from_slice(&bytes)
                .map_err(|error| StorageError::Serialization(error.to_string()))?;
            metrics::counter!("storage.file.reads").increment(1);
            Ok(Some(value))
        })
    }

    fn set<'a>(
        &'a self,
        key: &'a str,
        value: Value,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>> {
        Box::pin(async move {
            let bytes = serde_json::to_vec(&value)
                .map_err(|error| StorageError::Serialization(error.to_string()))?;

            tokio::fs::create_dir_all(&self.dir)
                .await
                .map_err(|error| StorageError::Io(error.to_string()))?;

            let path = self.document_path(key);
            let staging = self.dir.join(format!("{key}.json.tmp"));

            tokio::fs::write(&staging, &bytes)
                .await
                .map_err(|error| StorageError::Io(error.to_string()))?;
            tokio::fs::rename(&staging, &path)
                .await
                .map_err(|error| StorageError::Io(error.to_string()))?;

            metrics::counter!("storage.file.writes").increment(1);
            tracing::debug!(key, bytes = bytes.len(), "Wrote document");
            Ok(())
        })
    }
}

//! Key-value store trait and related types for list persistence.
//!
//! This module defines the core abstraction for the persistence
//! collaborator - an opaque key-value store holding whole serialized
//! documents, read whole and written whole.
//!
//! # Design
//!
//! The `KeyValueStore` trait is deliberately minimal and focused. It
//! provides exactly what the list core needs:
//!
//! - Read the document stored under a key (or learn that none exists)
//! - Replace the document stored under a key
//!
//! There are no incremental or partial updates, no schema versioning, and
//! no transactional guarantees: every mutation of the list serializes the
//! full array and writes it through.
//!
//! # Implementations
//!
//! - `JsonFileStore` (in the `checklist` crate): production implementation
//! - `MemoryStore` (in the `checklist-testing` crate): fast, deterministic testing
//!
//! # Example
//!
//! ```no_run
//! use checklist_core::kv::{KeyValueStore, StorageError};
//!
//! async fn example<K: KeyValueStore>(store: &K) -> Result<(), StorageError> {
//!     let items = serde_json::json!([{"value": "buy milk", "key": "1735689600000"}]);
//!     store.set("list-items", items).await?;
//!
//!     let stored = store.get("list-items").await?;
//!     assert!(stored.is_some());
//!     Ok(())
//! }
//! ```

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors that can occur during key-value store operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing store failed (connection, engine, or medium error).
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// General I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Key-value store abstraction for list persistence.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to be safely used in async
/// contexts and shared across threads.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
/// `async fn` to enable trait object usage (`Arc<dyn KeyValueStore>`).
/// This is required for the effect system, where reducers create effects
/// that capture the store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Some(value)`: A document exists under this key
    /// - `None`: Nothing has been stored under this key (not an error -
    ///   fresh installs start empty)
    ///
    /// # Errors
    ///
    /// - `Backend`: The backing store failed
    /// - `Serialization`: The stored document could not be decoded
    /// - `Io`: Reading the backing medium failed
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Value>, StorageError>> + Send + 'a>>;

    /// Replace the value stored under `key`.
    ///
    /// The previous document, if any, is overwritten whole.
    ///
    /// # Errors
    ///
    /// - `Backend`: The backing store failed
    /// - `Serialization`: The document could not be encoded
    /// - `Io`: Writing the backing medium failed
    fn set<'a>(
        &'a self,
        key: &'a str,
        value: Value,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>>;
}

//! # Checklist Testing
//!
//! Testing utilities and helpers for the Checklist architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - An in-memory key-value store with failure injection
//! - Assertion helpers for reducers
//!
//! ## Example
//!
//! ```ignore
//! use checklist_testing::{MemoryStore, test_clock};
//! use checklist_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_add_flow() {
//!     let storage = Arc::new(MemoryStore::new());
//!     let store = ListStore::new(storage, Arc::new(SequentialKeys::new()));
//!
//!     store.load().await?;
//!     store.add("buy milk").await?;
//!
//!     let items = store.items().await;
//!     assert_eq!(items.len(), 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use checklist_core::environment::Clock;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use checklist_core::environment::KeyGenerator;
    use checklist_core::kv::{KeyValueStore, StorageError};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use checklist_testing::mocks::FixedClock;
    /// use checklist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Deterministic key generator: "1", "2", "3", …
    ///
    /// Item keys in production are opaque timestamp strings; tests want
    /// predictable values instead.
    #[derive(Debug)]
    pub struct SequentialKeys {
        next: AtomicU64,
    }

    impl SequentialKeys {
        /// Create a generator whose first key is "1"
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(1),
            }
        }
    }

    impl Default for SequentialKeys {
        fn default() -> Self {
            Self::new()
        }
    }

    impl KeyGenerator for SequentialKeys {
        fn next_key(&self) -> String {
            self.next.fetch_add(1, Ordering::Relaxed).to_string()
        }
    }

    /// In-memory key-value store for fast, deterministic tests
    ///
    /// Documents live in a `HashMap` behind a mutex. Writes can be made to
    /// fail on demand with [`MemoryStore::fail_writes`], for exercising the
    /// write-through error path.
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        documents: Mutex<HashMap<String, Value>>,
        fail_writes: AtomicBool,
    }

    impl MemoryStore {
        /// Create an empty store
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a store shared behind an `Arc`, pre-seeded with documents
        #[must_use]
        pub fn with_documents(documents: Vec<(&str, Value)>) -> Arc<Self> {
            let store = Self::new();
            {
                let mut map = store.lock_documents();
                for (key, value) in documents {
                    map.insert(key.to_string(), value);
                }
            }
            Arc::new(store)
        }

        /// Make every subsequent `set` fail with a backend error
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        /// Inspect the document currently stored under `key`
        #[must_use]
        pub fn document(&self, key: &str) -> Option<Value> {
            self.lock_documents().get(key).cloned()
        }

        fn lock_documents(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
            self.documents
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get<'a>(
            &'a self,
            key: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Option<Value>, StorageError>> + Send + 'a>>
        {
            Box::pin(async move { Ok(self.lock_documents().get(key).cloned()) })
        }

        fn set<'a>(
            &'a self,
            key: &'a str,
            value: Value,
        ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>> {
            Box::pin(async move {
                if self.fail_writes.load(Ordering::SeqCst) {
                    return Err(StorageError::Backend(
                        "write failure injected by test".to_string(),
                    ));
                }
                self.lock_documents().insert(key.to_string(), value);
                Ok(())
            })
        }
    }
}

/// Fluent reducer test harness
pub mod reducer_test;

// Re-export commonly used items
pub use mocks::{FixedClock, MemoryStore, SequentialKeys, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;
    use checklist_core::environment::KeyGenerator;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_sequential_keys() {
        let keys = SequentialKeys::new();
        assert_eq!(keys.next_key(), "1");
        assert_eq!(keys.next_key(), "2");
    }

    #[tokio::test]
    async fn memory_store_round_trips_documents() {
        use checklist_core::kv::KeyValueStore;

        let store = MemoryStore::new();
        let value = serde_json::json!([{"value": "a", "key": "1"}]);

        assert!(matches!(store.get("list-items").await, Ok(None)));
        assert!(store.set("list-items", value.clone()).await.is_ok());

        let stored = store.get("list-items").await;
        assert!(matches!(stored, Ok(Some(v)) if v == value));
    }

    #[tokio::test]
    async fn memory_store_injects_write_failures() {
        use checklist_core::kv::KeyValueStore;

        let store = MemoryStore::new();
        store.fail_writes(true);

        let result = store.set("list-items", serde_json::json!([])).await;
        assert!(result.is_err());
        assert!(store.document("list-items").is_none());
    }
}

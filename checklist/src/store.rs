//! The list store facade - the boundary the UI event layer calls.
//!
//! Wraps the store runtime with typed operations. Each mutation is
//! validated against the current state first, so callers get the error
//! synchronously; the reducer re-validates when it applies the action,
//! since it is the serialization point for concurrent senders.

use crate::action::ListAction;
use crate::error::ListError;
use crate::item::ListItem;
use crate::policy::{self, Mode, RenderPlan};
use crate::reducer::{ListEnvironment, ListReducer, read_items};
use crate::state::ListState;
use checklist_core::environment::KeyGenerator;
use checklist_core::kv::KeyValueStore;
use checklist_runtime::Store;
use std::sync::Arc;
use std::time::Duration;

/// The to-do list store
///
/// Owns the runtime store driving the list reducer. All mutation methods
/// are write-through: in-memory state changes first, the persistence
/// write and refresh run asynchronously afterwards.
///
/// # Example
///
/// ```ignore
/// use checklist::{ListStore, JsonFileStore};
/// use checklist_core::environment::{SystemClock, TimestampKeys};
/// use std::sync::Arc;
///
/// let storage = Arc::new(JsonFileStore::new("./data"));
/// let keys = Arc::new(TimestampKeys::new(SystemClock));
/// let store = ListStore::new(storage, keys);
///
/// store.load().await?;
/// store.add("buy milk").await?;
/// ```
pub struct ListStore {
    store: Store<ListState, ListAction, ListEnvironment, ListReducer>,
    storage: Arc<dyn KeyValueStore>,
}

impl ListStore {
    /// Creates a store over the given persistence collaborator and key generator
    ///
    /// The store starts unloaded: call [`ListStore::load`] once at startup
    /// before sending mutations.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, keys: Arc<dyn KeyGenerator>) -> Self {
        let environment = ListEnvironment::new(Arc::clone(&storage), keys);
        let store = Store::new(ListState::new(), ListReducer::new(), environment);
        Self { store, storage }
    }

    /// Loads the persisted list, applies the sort policy, and marks the
    /// store ready for mutations
    ///
    /// A missing document yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates storage and runtime failures.
    pub async fn load(&self) -> Result<(), ListError> {
        let items = read_items(Arc::clone(&self.storage)).await?;
        tracing::debug!(count = items.len(), "Loaded persisted list");
        self.store.send(ListAction::Loaded { items }).await?;
        Ok(())
    }

    /// Adds a new item holding `text`
    ///
    /// Blank text is silently ignored (the entry row commits on blur,
    /// which fires for untouched inputs too).
    ///
    /// # Errors
    ///
    /// Returns [`ListError::StorageNotReady`] before the first [`ListStore::load`].
    pub async fn add(&self, text: &str) -> Result<(), ListError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        self.store.state(ListState::ensure_loaded).await?;
        self.store
            .send(ListAction::Add {
                text: text.to_string(),
            })
            .await?;
        Ok(())
    }

    /// Replaces `existing` with `updated` at its current index
    ///
    /// The halves arrive as `Option` because the UI event payload can be
    /// missing either one.
    ///
    /// # Errors
    ///
    /// - [`ListError::InvalidArgument`] if either half is `None`
    /// - [`ListError::StorageNotReady`] before the first load
    /// - [`ListError::NotFound`] if `existing` is not in the current list
    pub async fn edit(
        &self,
        existing: Option<ListItem>,
        updated: Option<ListItem>,
    ) -> Result<(), ListError> {
        let (Some(existing), Some(updated)) = (existing, updated) else {
            return Err(ListError::InvalidArgument);
        };
        self.store
            .state(|s| s.validate_edit(Some(&existing), Some(&updated)).map(|_| ()))
            .await?;
        self.store
            .send(ListAction::Edit { existing, updated })
            .await?;
        Ok(())
    }

    /// Removes the first item equal to `item`; absent items are a no-op
    ///
    /// # Errors
    ///
    /// Returns [`ListError::StorageNotReady`] before the first load.
    pub async fn delete(&self, item: ListItem) -> Result<(), ListError> {
        self.store.state(ListState::ensure_loaded).await?;
        self.store.send(ListAction::Delete { item }).await?;
        Ok(())
    }

    /// Moves the item at `from` to `to` and acknowledges completion
    ///
    /// `to` past the end clamps to the end. The returned `true` is the
    /// completion acknowledgement the drag gesture waits for.
    ///
    /// # Errors
    ///
    /// - [`ListError::StorageNotReady`] before the first load
    /// - [`ListError::InvalidReorder`] if `from` does not resolve to exactly one element
    pub async fn reorder(&self, from: usize, to: usize) -> Result<bool, ListError> {
        self.store.state(|s| s.validate_reorder(from)).await?;
        self.store.send(ListAction::Reorder { from, to }).await?;
        Ok(true)
    }

    /// Flips the completion flag of `item` (an edit with a toggled flag)
    ///
    /// # Errors
    ///
    /// Same contract as [`ListStore::edit`].
    pub async fn toggle_complete(&self, item: ListItem) -> Result<(), ListError> {
        let updated = item.toggled();
        self.edit(Some(item), Some(updated)).await
    }

    /// Returns a snapshot of the current item sequence
    pub async fn items(&self) -> Vec<ListItem> {
        self.store.state(|s| s.items.clone()).await
    }

    /// Reads current state via a closure
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&ListState) -> T,
    {
        self.store.state(f).await
    }

    /// Builds the render plan for the given mode over the current items
    pub async fn render_plan(&self, mode: Mode) -> RenderPlan {
        self.store
            .state(|s| policy::render_plan(mode, &s.items))
            .await
    }

    /// Waits until every pending persistence effect has landed
    pub async fn settled(&self) {
        self.store.settled().await;
    }

    /// Gracefully shuts the store down, waiting for in-flight writes
    ///
    /// # Errors
    ///
    /// Propagates [`checklist_runtime::StoreError::ShutdownTimeout`] if
    /// effects are still running when the timeout expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), ListError> {
        self.store.shutdown(timeout).await?;
        Ok(())
    }
}

//! Reducer logic for the to-do list.
//!
//! Every mutation follows the same shape: validate, build a fresh item
//! sequence, replace the state's sequence atomically, then emit a single
//! write-through effect that persists the full array and feeds a refresh
//! back into the reducer.

use crate::action::ListAction;
use crate::error::ListError;
use crate::item::{ItemKey, ListItem};
use crate::policy;
use crate::state::ListState;
use checklist_core::environment::KeyGenerator;
use checklist_core::kv::{KeyValueStore, StorageError};
use checklist_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// The storage key holding the serialized item array
pub const LIST_ITEMS_KEY: &str = "list-items";

/// Environment dependencies for the list reducer
#[derive(Clone)]
pub struct ListEnvironment {
    /// The persistence collaborator
    pub storage: Arc<dyn KeyValueStore>,
    /// Generator for fresh item keys
    pub keys: Arc<dyn KeyGenerator>,
}

impl ListEnvironment {
    /// Creates a new `ListEnvironment`
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, keys: Arc<dyn KeyGenerator>) -> Self {
        Self { storage, keys }
    }
}

/// Reads and decodes the persisted item array
///
/// A missing document is an empty list, not an error - fresh installs
/// start with nothing stored.
///
/// # Errors
///
/// Propagates storage failures; a document that does not decode as an
/// item array becomes [`StorageError::Serialization`].
pub async fn read_items(storage: Arc<dyn KeyValueStore>) -> Result<Vec<ListItem>, StorageError> {
    let Some(value) = storage.get(LIST_ITEMS_KEY).await? else {
        return Ok(Vec::new());
    };
    serde_json::from_value(value).map_err(|error| StorageError::Serialization(error.to_string()))
}

/// Reducer for the to-do list
#[derive(Clone, Debug, Default)]
pub struct ListReducer;

impl ListReducer {
    /// Creates a new `ListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Records a failed mutation without touching the item sequence
    fn reject(state: &mut ListState, error: &ListError) -> SmallVec<[Effect<ListAction>; 4]> {
        tracing::warn!(%error, "List mutation rejected");
        state.last_error = Some(error.to_string());
        smallvec![Effect::None]
    }

    /// Makes `items` current and emits the write-through effect
    fn commit(
        state: &mut ListState,
        items: Vec<ListItem>,
        env: &ListEnvironment,
    ) -> SmallVec<[Effect<ListAction>; 4]> {
        state.items = items;
        state.last_error = None;
        smallvec![Self::write_through(env, state.items.clone())]
    }

    /// The write-through: persist the full array, then re-read it so the
    /// refresh lands as a `Loaded` feedback action
    ///
    /// A failed write leaves in-memory state already mutated; that
    /// inconsistency is accepted and only recorded.
    fn write_through(env: &ListEnvironment, items: Vec<ListItem>) -> Effect<ListAction> {
        let storage = Arc::clone(&env.storage);
        Effect::Future(Box::pin(async move {
            let value = match serde_json::to_value(&items) {
                Ok(value) => value,
                Err(error) => {
                    tracing::error!(%error, "Failed to serialize the item array");
                    return Some(ListAction::SaveFailed {
                        reason: error.to_string(),
                    });
                },
            };

            if let Err(error) = storage.set(LIST_ITEMS_KEY, value).await {
                tracing::error!(%error, "Write-through to storage failed");
                metrics::counter!("list.storage.write_failures").increment(1);
                return Some(ListAction::SaveFailed {
                    reason: error.to_string(),
                });
            }
            metrics::counter!("list.storage.writes").increment(1);

            match read_items(storage).await {
                Ok(items) => Some(ListAction::Loaded { items }),
                Err(error) => {
                    tracing::error!(%error, "Refresh read after write-through failed");
                    None
                },
            }
        }))
    }
}

impl Reducer for ListReducer {
    type State = ListState;
    type Action = ListAction;
    type Environment = ListEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ListAction::Add { text } => {
                // Empty input is silently ignored, not an error
                if text.trim().is_empty() {
                    return smallvec![Effect::None];
                }
                if let Err(error) = state.ensure_loaded() {
                    return Self::reject(state, &error);
                }

                let key = ItemKey::new(env.keys.next_key());
                // Key uniqueness is the generator's guarantee; guard it anyway
                if state.contains_key(&key) {
                    tracing::warn!(%key, "Key generator produced a duplicate key");
                    state.last_error = Some(format!("Duplicate item key: {key}"));
                    return smallvec![Effect::None];
                }

                let items = state.appended(ListItem::new(key, text));
                Self::commit(state, items, env)
            },

            ListAction::Edit { existing, updated } => {
                match state.validate_edit(Some(&existing), Some(&updated)) {
                    Ok(index) => {
                        let items = state.replaced(index, updated);
                        Self::commit(state, items, env)
                    },
                    Err(error) => Self::reject(state, &error),
                }
            },

            ListAction::Delete { item } => {
                if let Err(error) = state.ensure_loaded() {
                    return Self::reject(state, &error);
                }
                // Absent item: persists an unchanged copy, same as the no-op contract
                let items = state.without(&item);
                Self::commit(state, items, env)
            },

            ListAction::Reorder { from, to } => {
                if let Err(error) = state.ensure_loaded() {
                    return Self::reject(state, &error);
                }
                match state.moved(from, to) {
                    Ok(items) => Self::commit(state, items, env),
                    Err(error) => Self::reject(state, &error),
                }
            },

            ListAction::Loaded { items } => {
                state.items = policy::sorted(&items);
                state.loaded = true;
                state.last_error = None;
                smallvec![Effect::None]
            },

            ListAction::SaveFailed { reason } => {
                state.last_error = Some(reason);
                smallvec![Effect::None]
            },
        }
    }
}

//! Error taxonomy for list operations.
//!
//! Every error is fatal to the triggering interaction - there is no retry
//! or recovery path. All operations are local and user-triggered, so the
//! user retries the action manually.

use checklist_core::kv::StorageError;
use checklist_runtime::StoreError;
use thiserror::Error;

/// Errors surfaced by list operations
#[derive(Error, Debug)]
pub enum ListError {
    /// The item handed to `edit` is not present in the current list
    #[error("Edit target not found in the list")]
    NotFound,

    /// The edit payload is missing its item or its replacement value
    #[error("Missing item or replacement value")]
    InvalidArgument,

    /// The reorder source index does not resolve to exactly one element
    #[error("Reorder index {from} out of bounds for list of length {len}")]
    InvalidReorder {
        /// The offending source index
        from: usize,
        /// Length of the list at the time of the attempt
        len: usize,
    },

    /// A mutation arrived before the persisted list finished loading
    #[error("Storage has not finished loading")]
    StorageNotReady,

    /// The persistence collaborator failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The store runtime refused the action
    #[error(transparent)]
    Runtime(#[from] StoreError),
}

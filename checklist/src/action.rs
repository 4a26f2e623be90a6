//! Actions processed by the list reducer.

use crate::item::ListItem;

/// All inputs to the list reducer: UI triggers plus feedback from the
/// persistence effects.
///
/// `toggle_complete` has no action of its own - it is an [`Edit`] whose
/// replacement carries a flipped completion flag.
///
/// [`Edit`]: ListAction::Edit
#[derive(Clone, Debug)]
pub enum ListAction {
    /// Append a new item built from `text`
    Add {
        /// Text content for the new item
        text: String,
    },

    /// Replace `existing` with `updated` at its current index
    Edit {
        /// The item as it appears in the current list
        existing: ListItem,
        /// The replacement
        updated: ListItem,
    },

    /// Remove the first item equal to `item`
    Delete {
        /// The item to remove
        item: ListItem,
    },

    /// Move the item at `from` to `to`
    Reorder {
        /// Source index (must resolve to exactly one element)
        from: usize,
        /// Destination index (clamped to the end)
        to: usize,
    },

    /// Feedback: the persisted array arrived; sort it and make it current
    Loaded {
        /// Items as read from storage
        items: Vec<ListItem>,
    },

    /// Feedback: the write-through failed; record it (no rollback)
    SaveFailed {
        /// Failure description
        reason: String,
    },
}

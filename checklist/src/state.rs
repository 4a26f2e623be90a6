//! List state and its copy-on-write operations.
//!
//! The item sequence is treated as an immutable value: every operation
//! builds a fresh `Vec<ListItem>` and the reducer replaces the state's
//! sequence atomically. Nothing ever mutates a sequence that a render
//! pass may still be holding.

use crate::error::ListError;
use crate::item::{ItemKey, ListItem};

/// State of the to-do list
#[derive(Clone, Debug, Default)]
pub struct ListState {
    /// The ordered item sequence currently considered current
    pub items: Vec<ListItem>,
    /// Whether the persisted list has been loaded (mutations before this
    /// point fail with `StorageNotReady`)
    pub loaded: bool,
    /// Last reducer-level failure (if any)
    pub last_error: Option<String>,
}

impl ListState {
    /// Creates the pre-load state: empty and not yet ready for mutations
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
            last_error: None,
        }
    }

    /// Creates a loaded state holding `items`, mostly useful in tests
    #[must_use]
    pub const fn ready(items: Vec<ListItem>) -> Self {
        Self {
            items,
            loaded: true,
            last_error: None,
        }
    }

    /// Returns the number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks whether any item carries the given key
    #[must_use]
    pub fn contains_key(&self, key: &ItemKey) -> bool {
        self.items.iter().any(|item| item.key == *key)
    }

    /// Returns the index of the first item equal to `item`
    #[must_use]
    pub fn position_of(&self, item: &ListItem) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    /// Fails with `StorageNotReady` until the persisted list has loaded
    ///
    /// # Errors
    ///
    /// Returns [`ListError::StorageNotReady`] before the first successful load.
    pub fn ensure_loaded(&self) -> Result<(), ListError> {
        if self.loaded {
            Ok(())
        } else {
            Err(ListError::StorageNotReady)
        }
    }

    /// Validates an edit payload and resolves the target index
    ///
    /// # Errors
    ///
    /// - [`ListError::InvalidArgument`] if either half of the payload is missing
    /// - [`ListError::StorageNotReady`] before the first load
    /// - [`ListError::NotFound`] if no item equals `existing`
    pub fn validate_edit(
        &self,
        existing: Option<&ListItem>,
        updated: Option<&ListItem>,
    ) -> Result<usize, ListError> {
        let (Some(existing), Some(_)) = (existing, updated) else {
            return Err(ListError::InvalidArgument);
        };
        self.ensure_loaded()?;
        self.position_of(existing).ok_or(ListError::NotFound)
    }

    /// Validates a reorder source index
    ///
    /// Only the source index can fail: a destination past the end clamps
    /// to the end on application.
    ///
    /// # Errors
    ///
    /// - [`ListError::StorageNotReady`] before the first load
    /// - [`ListError::InvalidReorder`] if `from` does not resolve to exactly one element
    pub fn validate_reorder(&self, from: usize) -> Result<(), ListError> {
        self.ensure_loaded()?;
        if from >= self.items.len() {
            return Err(ListError::InvalidReorder {
                from,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    /// Returns a fresh sequence with `item` appended
    #[must_use]
    pub fn appended(&self, item: ListItem) -> Vec<ListItem> {
        let mut items = self.items.clone();
        items.push(item);
        items
    }

    /// Returns a fresh sequence with the element at `index` replaced
    ///
    /// Out-of-range indices return the sequence unchanged; callers resolve
    /// the index through [`ListState::validate_edit`] first.
    #[must_use]
    pub fn replaced(&self, index: usize, updated: ListItem) -> Vec<ListItem> {
        let mut items = self.items.clone();
        if let Some(slot) = items.get_mut(index) {
            *slot = updated;
        }
        items
    }

    /// Returns a fresh sequence without the first element equal to `item`
    ///
    /// An absent item yields an unchanged copy (deleting twice is a no-op).
    #[must_use]
    pub fn without(&self, item: &ListItem) -> Vec<ListItem> {
        let mut items = self.items.clone();
        if let Some(index) = self.position_of(item) {
            items.remove(index);
        }
        items
    }

    /// Returns a fresh sequence with the element at `from` moved to `to`
    ///
    /// `to` past the end inserts at the end.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidReorder`] if `from` is out of range.
    pub fn moved(&self, from: usize, to: usize) -> Result<Vec<ListItem>, ListError> {
        if from >= self.items.len() {
            return Err(ListError::InvalidReorder {
                from,
                len: self.items.len(),
            });
        }
        let mut items = self.items.clone();
        let item = items.remove(from);
        let to = to.min(items.len());
        items.insert(to, item);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str, value: &str) -> ListItem {
        ListItem::new(ItemKey::new(key), value.to_string())
    }

    fn three_items() -> ListState {
        ListState::ready(vec![item("1", "a"), item("2", "b"), item("3", "c")])
    }

    #[test]
    fn mutations_require_a_loaded_list() {
        let state = ListState::new();
        assert!(matches!(
            state.ensure_loaded(),
            Err(ListError::StorageNotReady)
        ));
        assert!(ListState::ready(Vec::new()).ensure_loaded().is_ok());
    }

    #[test]
    fn appended_leaves_the_original_untouched() {
        let state = three_items();
        let items = state.appended(item("4", "d"));

        assert_eq!(items.len(), 4);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn replaced_swaps_exactly_one_slot() {
        let state = three_items();
        let items = state.replaced(1, item("2", "b2"));

        assert_eq!(items.len(), 3);
        assert_eq!(items[1].value, "b2");
        assert_eq!(items[0].value, "a");
        assert_eq!(items[2].value, "c");
    }

    #[test]
    fn without_removes_only_the_first_match() {
        let target = item("2", "b");
        let state = three_items();

        let items = state.without(&target);
        assert_eq!(items.len(), 2);
        assert!(!items.contains(&target));

        // absent item: unchanged copy
        let items = state.without(&item("9", "zzz"));
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn moved_relocates_and_preserves_the_rest() {
        let state = three_items();
        let items = state.moved(0, 2).map_or_else(|_| Vec::new(), |v| v);

        let values: Vec<&str> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["b", "c", "a"]);
    }

    #[test]
    fn moved_clamps_destination_to_end() {
        let state = three_items();
        let items = state.moved(0, 99).map_or_else(|_| Vec::new(), |v| v);

        let values: Vec<&str> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["b", "c", "a"]);
    }

    #[test]
    fn moved_rejects_out_of_range_source() {
        let state = three_items();
        assert!(matches!(
            state.moved(3, 0),
            Err(ListError::InvalidReorder { from: 3, len: 3 })
        ));
    }

    #[test]
    fn validate_edit_walks_the_failure_taxonomy() {
        let state = three_items();
        let present = item("2", "b");
        let updated = present.with_value("b2");

        assert!(matches!(
            state.validate_edit(None, Some(&updated)),
            Err(ListError::InvalidArgument)
        ));
        assert!(matches!(
            state.validate_edit(Some(&present), None),
            Err(ListError::InvalidArgument)
        ));
        assert!(matches!(
            ListState::new().validate_edit(Some(&present), Some(&updated)),
            Err(ListError::StorageNotReady)
        ));
        assert!(matches!(
            state.validate_edit(Some(&item("9", "zzz")), Some(&updated)),
            Err(ListError::NotFound)
        ));
        assert!(matches!(
            state.validate_edit(Some(&present), Some(&updated)),
            Ok(1)
        ));
    }
}

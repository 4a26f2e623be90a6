//! Sort and display policy.
//!
//! Ordering and presentation are pure functions over the item sequence:
//! the comparator groups completed items ahead of active ones, and
//! [`render_plan`] maps a mode plus the current items to a render plan
//! value. List mutation logic knows nothing about either.

use crate::item::{ItemKey, ListItem};
use std::cmp::Ordering;

/// Comparator grouping completed items ahead of active ones
///
/// Two items with equal completion status compare equal, so a stable sort
/// preserves their stored relative order - the comparator defines the
/// grouping, not a total order.
#[must_use]
pub fn completion_order(a: &ListItem, b: &ListItem) -> Ordering {
    b.is_complete.cmp(&a.is_complete)
}

/// Returns a fresh sequence ordered by the completion grouping
#[must_use]
pub fn sorted(items: &[ListItem]) -> Vec<ListItem> {
    let mut items = items.to_vec();
    items.sort_by(completion_order);
    items
}

/// Which rendering pass the UI should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Read-only list; tapping an item toggles its completion
    #[default]
    View,
    /// Editable list: per-item text edit, delete, drag-reorder, and an
    /// entry point for adding a new item
    Edit,
}

impl Mode {
    /// The other mode (the pencil button flips; the platform back button
    /// assigns `Mode::View` directly)
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::View => Self::Edit,
            Self::Edit => Self::View,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::View => write!(f, "View"),
            Self::Edit => write!(f, "Edit"),
        }
    }
}

/// One read-only row
///
/// Tapping the row submits `toggle_complete` for the item carrying `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    /// Identity of the rendered item
    pub key: ItemKey,
    /// Text content
    pub text: String,
    /// Rendered struck-through when the item is complete
    pub struck_through: bool,
}

/// One editable row inside the reorder group
///
/// `index` is the absolute list index - the coordinate the drag gesture
/// reports to `reorder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRow {
    /// Absolute list index, the reorder coordinate
    pub index: usize,
    /// Identity of the rendered item
    pub key: ItemKey,
    /// Text content, editable in place
    pub text: String,
    /// Rendered struck-through when the item is complete
    pub struck_through: bool,
}

/// The trailing blank input that commits its text as an `add`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    /// Placeholder shown while the input is empty
    pub placeholder: &'static str,
}

/// A render plan: everything the rendering layer needs, nothing it owns
///
/// Edit mode uses a single reorder group over the whole list, so row
/// indices are absolute and no group-to-list index translation exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPlan {
    /// Read-only pass
    View {
        /// One row per item, in list order
        rows: Vec<ViewRow>,
    },
    /// Editable pass
    Edit {
        /// One row per item, in list order, inside one reorder group
        rows: Vec<EditRow>,
        /// The add-new-item entry point below the group
        entry: EntryRow,
    },
}

/// Maps a mode and the current items to a render plan
#[must_use]
pub fn render_plan(mode: Mode, items: &[ListItem]) -> RenderPlan {
    match mode {
        Mode::View => RenderPlan::View {
            rows: items
                .iter()
                .map(|item| ViewRow {
                    key: item.key.clone(),
                    text: item.value.clone(),
                    struck_through: item.is_complete,
                })
                .collect(),
        },
        Mode::Edit => RenderPlan::Edit {
            rows: items
                .iter()
                .enumerate()
                .map(|(index, item)| EditRow {
                    index,
                    key: item.key.clone(),
                    text: item.value.clone(),
                    struck_through: item.is_complete,
                })
                .collect(),
            entry: EntryRow {
                placeholder: "Enter text...",
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str, value: &str, complete: bool) -> ListItem {
        let mut it = ListItem::new(ItemKey::new(key), value.to_string());
        it.is_complete = complete;
        it
    }

    #[test]
    fn completed_items_sort_ahead_of_active_ones() {
        let items = vec![
            item("1", "A", false),
            item("2", "B", true),
            item("3", "C", false),
        ];

        let sorted_items = sorted(&items);
        let values: Vec<&str> = sorted_items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["B", "A", "C"]);
    }

    #[test]
    fn sorting_is_stable_within_each_group() {
        let items = vec![
            item("1", "A", true),
            item("2", "B", false),
            item("3", "C", true),
            item("4", "D", false),
        ];

        let sorted_items = sorted(&items);
        let values: Vec<&str> = sorted_items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn mode_toggles_between_the_two_passes() {
        assert_eq!(Mode::default(), Mode::View);
        assert_eq!(Mode::View.toggled(), Mode::Edit);
        assert_eq!(Mode::Edit.toggled(), Mode::View);
        assert_eq!(format!("{}", Mode::Edit), "Edit");
    }

    #[test]
    fn view_plan_marks_completed_rows() {
        let items = vec![item("1", "A", false), item("2", "B", true)];

        let RenderPlan::View { rows } = render_plan(Mode::View, &items) else {
            unreachable!("view mode produces a view plan");
        };

        assert_eq!(rows.len(), 2);
        assert!(!rows[0].struck_through);
        assert!(rows[1].struck_through);
        assert_eq!(rows[1].text, "B");
    }

    #[test]
    fn edit_plan_carries_absolute_indices_and_an_entry_row() {
        let items = vec![item("1", "A", false), item("2", "B", true)];

        let RenderPlan::Edit { rows, entry } = render_plan(Mode::Edit, &items) else {
            unreachable!("edit mode produces an edit plan");
        };

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[1].index, 1);
        assert_eq!(entry.placeholder, "Enter text...");
    }

    #[test]
    fn empty_list_still_offers_the_entry_row() {
        let RenderPlan::Edit { rows, entry } = render_plan(Mode::Edit, &[]) else {
            unreachable!("edit mode produces an edit plan");
        };
        assert!(rows.is_empty());
        assert!(!entry.placeholder.is_empty());

        let RenderPlan::View { rows } = render_plan(Mode::View, &[]) else {
            unreachable!("view mode produces a view plan");
        };
        assert!(rows.is_empty());
    }
}

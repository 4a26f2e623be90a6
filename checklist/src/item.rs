//! The list item entity and its identifier.

use serde::{Deserialize, Serialize};

/// Unique identifier for a list item
///
/// Keys are opaque tokens assigned once at creation time (millisecond
/// timestamps in production, sequential integers in tests) and never
/// re-derived. They exist for stable identity across renders, not for
/// ordering.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    /// Wraps a raw key token
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw key token
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do entry
///
/// Serializes as `{"value": …, "key": …, "isComplete": …}` - the exact
/// shape of the persisted array records. `isComplete` may be absent in
/// stored data and defaults to false on read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    /// Text content, user-editable, unconstrained
    pub value: String,
    /// Unique identifier
    pub key: ItemKey,
    /// Completion flag
    #[serde(default)]
    pub is_complete: bool,
}

impl ListItem {
    /// Creates a new active item
    #[must_use]
    pub const fn new(key: ItemKey, value: String) -> Self {
        Self {
            value,
            key,
            is_complete: false,
        }
    }

    /// Returns a copy of this item with the completion flag flipped
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            is_complete: !self.is_complete,
            ..self.clone()
        }
    }

    /// Returns a copy of this item with new text content
    #[must_use]
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str, value: &str) -> ListItem {
        ListItem::new(ItemKey::new(key), value.to_string())
    }

    #[test]
    fn new_items_start_active() {
        let it = item("1", "buy milk");
        assert_eq!(it.value, "buy milk");
        assert!(!it.is_complete);
    }

    #[test]
    fn toggled_flips_without_mutating() {
        let it = item("1", "buy milk");
        let done = it.toggled();

        assert!(done.is_complete);
        assert!(!it.is_complete);
        assert_eq!(done.key, it.key);

        let undone = done.toggled();
        assert!(!undone.is_complete);
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn serializes_with_camel_case_wire_names() {
        let it = item("1735689600000", "buy milk");
        let json = serde_json::to_value(&it).expect("item serializes");

        assert_eq!(
            json,
            serde_json::json!({
                "value": "buy milk",
                "key": "1735689600000",
                "isComplete": false,
            })
        );
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn missing_completion_flag_reads_as_false() {
        let json = serde_json::json!({"value": "buy milk", "key": "1"});
        let it: ListItem = serde_json::from_value(json).expect("item deserializes");
        assert!(!it.is_complete);
    }
}

//! Property tests for the ordering rules.

use checklist::{ItemKey, ListItem, ListState, sorted};
use proptest::prelude::*;

fn arbitrary_items() -> impl Strategy<Value = Vec<ListItem>> {
    prop::collection::vec(("[a-z]{0,8}", any::<bool>()), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(index, (value, complete))| {
                let mut item = ListItem::new(ItemKey::new(index.to_string()), value);
                item.is_complete = complete;
                item
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn sorting_preserves_the_multiset(items in arbitrary_items()) {
        let ordered = sorted(&items);

        prop_assert_eq!(ordered.len(), items.len());
        for item in &items {
            prop_assert!(ordered.contains(item));
        }
    }

    #[test]
    fn sorting_groups_completed_first(items in arbitrary_items()) {
        let ordered = sorted(&items);

        // Once an active item appears, no completed item may follow
        let first_active = ordered.iter().position(|i| !i.is_complete);
        if let Some(boundary) = first_active {
            prop_assert!(ordered[boundary..].iter().all(|i| !i.is_complete));
        }
    }

    #[test]
    fn sorting_keeps_each_group_stable(items in arbitrary_items()) {
        let ordered = sorted(&items);

        let completed_before: Vec<&ListItem> = items.iter().filter(|i| i.is_complete).collect();
        let completed_after: Vec<&ListItem> = ordered.iter().filter(|i| i.is_complete).collect();
        prop_assert_eq!(completed_before, completed_after);

        let active_before: Vec<&ListItem> = items.iter().filter(|i| !i.is_complete).collect();
        let active_after: Vec<&ListItem> = ordered.iter().filter(|i| !i.is_complete).collect();
        prop_assert_eq!(active_before, active_after);
    }

    #[test]
    fn sorting_twice_is_idempotent(items in arbitrary_items()) {
        let once = sorted(&items);
        let twice = sorted(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn moving_preserves_the_multiset_and_lands_the_item(
        items in arbitrary_items(),
        from in 0usize..12,
        to in 0usize..16,
    ) {
        let state = ListState::ready(items.clone());

        match state.moved(from, to) {
            Ok(moved) => {
                prop_assert_eq!(moved.len(), items.len());
                for item in &items {
                    prop_assert!(moved.contains(item));
                }
                let landed = to.min(items.len() - 1);
                prop_assert_eq!(&moved[landed], &items[from]);
            },
            Err(_) => {
                // Only an out-of-range source may fail
                prop_assert!(from >= items.len());
            },
        }
    }
}

//! Board projection -- the read-side grouping of items for display.
//!
//! Pure functions over an already-loaded item list. [`project`] must be
//! recomputed whenever the item list or the selected epic changes; identical
//! inputs produce identical output, so callers may treat the result as a
//! derived view rather than separately maintained state.

use std::collections::{BTreeMap, HashSet};

use crate::enums::ItemType;
use crate::item::Item;

/// Computes the column-grouped board view, optionally scoped to one epic.
///
/// Epics never appear inside columns; they are surfaced separately through
/// [`epics`]. With `selected_epic` set, the view contains exactly the epic's
/// stories plus the tasks of those stories -- a task whose story hangs under
/// a different epic is excluded even when present in `items`.
///
/// Items are grouped by column and sorted ascending by `order_index` within
/// each group. A column with no matching items is absent from the map, so
/// callers must treat a missing key as empty.
pub fn project<'a>(
    items: &'a [Item],
    selected_epic: Option<&str>,
) -> BTreeMap<&'a str, Vec<&'a Item>> {
    let visible = items
        .iter()
        .filter(|i| matches!(i.item_type, ItemType::Story | ItemType::Task));

    let selected: Vec<&Item> = match selected_epic {
        None => visible.collect(),
        Some(epic_id) => {
            let story_ids: HashSet<&str> = items
                .iter()
                .filter(|i| {
                    i.item_type == ItemType::Story
                        && i.parent_item_id.as_deref() == Some(epic_id)
                })
                .map(|i| i.id.as_str())
                .collect();

            visible
                .filter(|i| match i.item_type {
                    ItemType::Story => i.parent_item_id.as_deref() == Some(epic_id),
                    ItemType::Task => i
                        .parent_item_id
                        .as_deref()
                        .is_some_and(|p| story_ids.contains(p)),
                    ItemType::Epic => false,
                })
                .collect()
        }
    };

    let mut grouped: BTreeMap<&str, Vec<&Item>> = BTreeMap::new();
    for item in selected {
        grouped.entry(item.column_id.as_str()).or_default().push(item);
    }
    for column_items in grouped.values_mut() {
        column_items.sort_by_key(|i| i.order_index);
    }

    grouped
}

/// The board's epics in creation order (the epic selector lane).
pub fn epics(items: &[Item]) -> Vec<&Item> {
    let mut epics: Vec<&Item> = items
        .iter()
        .filter(|i| i.item_type == ItemType::Epic)
        .collect();
    epics.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    epics
}

/// Counts an epic's direct stories and the tasks under those stories.
pub fn descendant_counts(items: &[Item], epic_id: &str) -> (usize, usize) {
    let story_ids: HashSet<&str> = items
        .iter()
        .filter(|i| {
            i.item_type == ItemType::Story && i.parent_item_id.as_deref() == Some(epic_id)
        })
        .map(|i| i.id.as_str())
        .collect();
    let tasks = items
        .iter()
        .filter(|i| {
            i.item_type == ItemType::Task
                && i.parent_item_id
                    .as_deref()
                    .is_some_and(|p| story_ids.contains(p))
        })
        .count();
    (story_ids.len(), tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn item(
        id: &str,
        column: &str,
        item_type: ItemType,
        parent: Option<&str>,
        order: i64,
    ) -> Item {
        Item {
            id: id.into(),
            board_id: "bo-1".into(),
            column_id: column.into(),
            title: id.into(),
            item_type,
            parent_item_id: parent.map(str::to_owned),
            order_index: order,
            ..Item::default()
        }
    }

    fn sample_board() -> Vec<Item> {
        vec![
            item("e1", "col-a", ItemType::Epic, None, 0),
            item("s1", "col-a", ItemType::Story, Some("e1"), 1),
            item("t1", "col-a", ItemType::Task, Some("s1"), 2),
            item("t2", "col-b", ItemType::Task, Some("s1"), 0),
            item("e2", "col-a", ItemType::Epic, None, 3),
            item("s2", "col-b", ItemType::Story, Some("e2"), 1),
            item("t3", "col-b", ItemType::Task, Some("s2"), 2),
        ]
    }

    #[test]
    fn unscoped_returns_all_stories_and_tasks() {
        let items = sample_board();
        let view = project(&items, None);

        // Epics are never projected into columns.
        let all: Vec<&str> = view.values().flatten().map(|i| i.id.as_str()).collect();
        assert!(!all.contains(&"e1"));
        assert!(!all.contains(&"e2"));
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn groups_by_column_sorted_by_order() {
        let items = sample_board();
        let view = project(&items, None);

        let col_a: Vec<&str> = view["col-a"].iter().map(|i| i.id.as_str()).collect();
        assert_eq!(col_a, vec!["s1", "t1"]);

        let col_b: Vec<&str> = view["col-b"].iter().map(|i| i.id.as_str()).collect();
        assert_eq!(col_b, vec!["t2", "s2", "t3"]);
    }

    #[test]
    fn scoped_to_epic_keeps_only_its_stories_and_their_tasks() {
        let items = sample_board();
        let view = project(&items, Some("e1"));

        let all: Vec<&str> = view.values().flatten().map(|i| i.id.as_str()).collect();
        // s1 and its two tasks; t3 belongs to a story under e2 and is excluded.
        assert_eq!(all.len(), 3);
        assert!(all.contains(&"s1"));
        assert!(all.contains(&"t1"));
        assert!(all.contains(&"t2"));
        assert!(!all.contains(&"t3"));
        assert!(!all.contains(&"s2"));
    }

    #[test]
    fn epic_with_story_without_tasks() {
        // Two stories under the epic, one with one task, one with none:
        // exactly 3 items projected.
        let items = vec![
            item("e1", "col-a", ItemType::Epic, None, 0),
            item("s1", "col-a", ItemType::Story, Some("e1"), 1),
            item("s2", "col-a", ItemType::Story, Some("e1"), 2),
            item("t1", "col-a", ItemType::Task, Some("s1"), 3),
            item("e2", "col-a", ItemType::Epic, None, 4),
            item("s3", "col-a", ItemType::Story, Some("e2"), 5),
            item("t9", "col-a", ItemType::Task, Some("s3"), 6),
        ];
        let view = project(&items, Some("e1"));
        let all: Vec<&str> = view.values().flatten().map(|i| i.id.as_str()).collect();
        assert_eq!(all, vec!["s1", "s2", "t1"]);
    }

    #[test]
    fn empty_columns_are_absent() {
        let items = sample_board();
        let view = project(&items, Some("e2"));
        // e2's subtree lives entirely in col-b.
        assert!(!view.contains_key("col-a"));
        assert!(view.contains_key("col-b"));
    }

    #[test]
    fn pure_and_deterministic() {
        let items = sample_board();
        let first = project(&items, Some("e1"));
        let second = project(&items, Some("e1"));
        let flatten = |v: &BTreeMap<&str, Vec<&Item>>| -> Vec<String> {
            v.iter()
                .flat_map(|(c, list)| list.iter().map(move |i| format!("{c}:{}", i.id)))
                .collect()
        };
        assert_eq!(flatten(&first), flatten(&second));
    }

    #[test]
    fn epics_sorted_by_creation() {
        let mut items = sample_board();
        items[0].created_at = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        items[4].created_at = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();

        let lane: Vec<&str> = epics(&items).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(lane, vec!["e2", "e1"]);
    }

    #[test]
    fn descendant_counts_two_levels() {
        let items = sample_board();
        assert_eq!(descendant_counts(&items, "e1"), (1, 2));
        assert_eq!(descendant_counts(&items, "e2"), (1, 1));
        assert_eq!(descendant_counts(&items, "missing"), (0, 0));
    }
}

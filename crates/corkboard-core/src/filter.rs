//! Filter and partial-update types for item queries.

use crate::enums::ItemType;

/// Filter for item queries. `None`/empty fields are not applied.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub board_id: Option<String>,
    pub column_id: Option<String>,
    pub item_type: Option<ItemType>,
    /// Filter by parent item id.
    pub parent_item_id: Option<String>,
    /// Only items with no parent.
    pub no_parent: bool,
    pub limit: Option<i32>,
}

impl ItemFilter {
    /// Convenience constructor for the common board-wide query.
    pub fn for_board(board_id: impl Into<String>) -> Self {
        Self {
            board_id: Some(board_id.into()),
            ..Self::default()
        }
    }
}

/// Typed partial-update struct for items.
///
/// Only `Some` fields are applied; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdates {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ItemUpdates {
    /// Returns `true` if no field would be changed.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.tags.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_defaults() {
        let f = ItemFilter::default();
        assert!(f.board_id.is_none());
        assert!(f.item_type.is_none());
        assert!(!f.no_parent);
    }

    #[test]
    fn for_board_sets_board_only() {
        let f = ItemFilter::for_board("bo-1");
        assert_eq!(f.board_id.as_deref(), Some("bo-1"));
        assert!(f.column_id.is_none());
    }

    #[test]
    fn updates_is_empty() {
        assert!(ItemUpdates::default().is_empty());
        let u = ItemUpdates {
            title: Some("New".into()),
            ..ItemUpdates::default()
        };
        assert!(!u.is_empty());
    }
}

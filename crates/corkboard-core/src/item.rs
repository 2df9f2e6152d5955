//! Item struct -- the central domain model for the corkboard system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::ItemType;

/// Helper for `skip_serializing_if` on `Vec` fields.
fn is_empty_vec<T>(v: &Vec<T>) -> bool {
    v.is_empty()
}

/// A single node of the board hierarchy, always owned by exactly one board
/// and one column.
///
/// `order_index` is the sole sort key within a column: unique per column and
/// strictly increasing in creation order. `parent_item_id`, when set, points
/// at an item whose rank is exactly one less.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Opaque identifier, assigned by the storage layer at creation time.
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub board_id: String,

    #[serde(default)]
    pub column_id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    pub item_type: ItemType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_item_id: Option<String>,

    #[serde(default)]
    pub order_index: i64,

    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub tags: Vec<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_by: String,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Default for Item {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            board_id: String::new(),
            column_id: String::new(),
            title: String::new(),
            description: String::new(),
            item_type: ItemType::Task,
            parent_item_id: None,
            order_index: 0,
            tags: Vec::new(),
            created_at: now,
            created_by: String::new(),
            updated_at: now,
        }
    }
}

/// Insert payload for a new item.
///
/// The id is deliberately absent: the storage layer assigns one at creation
/// and returns the full [`Item`].
#[derive(Debug, Clone)]
pub struct NewItem {
    pub board_id: String,
    pub column_id: String,
    pub title: String,
    pub description: String,
    pub item_type: ItemType,
    pub parent_item_id: Option<String>,
    pub order_index: i64,
    pub tags: Vec<String>,
}

/// Builder for constructing a [`NewItem`] with a fluent API.
pub struct NewItemBuilder {
    item: NewItem,
}

impl NewItemBuilder {
    /// Creates a new builder for the given board, column, and title.
    pub fn new(
        board_id: impl Into<String>,
        column_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            item: NewItem {
                board_id: board_id.into(),
                column_id: column_id.into(),
                title: title.into(),
                description: String::new(),
                item_type: ItemType::Task,
                parent_item_id: None,
                order_index: 0,
                tags: Vec::new(),
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.item.description = description.into();
        self
    }

    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item.item_type = item_type;
        self
    }

    pub fn parent(mut self, parent_item_id: impl Into<String>) -> Self {
        self.item.parent_item_id = Some(parent_item_id.into());
        self
    }

    pub fn order_index(mut self, order_index: i64) -> Self {
        self.item.order_index = order_index;
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.item.tags = tags;
        self
    }

    /// Consumes the builder and returns the constructed [`NewItem`].
    pub fn build(self) -> NewItem {
        self.item
    }
}

//! Board and column records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A board: the top-level container for columns and items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_by: String,
}

/// A column on a board. `order_index` is board-scoped and assigned max+1 at
/// creation, the same way item order is assigned within a column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub board_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub order_index: i64,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_serde_roundtrip() {
        let board = Board {
            id: "bo-x1y2z3".into(),
            name: "Sprint 12".into(),
            description: "Q3 delivery".into(),
            created_at: Utc::now(),
            created_by: "alice".into(),
        };
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "bo-x1y2z3");
        assert_eq!(back.name, "Sprint 12");
    }

    #[test]
    fn column_serde_roundtrip() {
        let column = Column {
            id: "co-aaaaaa".into(),
            board_id: "bo-x1y2z3".into(),
            name: "Backlog".into(),
            order_index: 0,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&column).unwrap();
        let back: Column = serde_json::from_str(&json).unwrap();
        assert_eq!(back.board_id, "bo-x1y2z3");
        assert_eq!(back.order_index, 0);
    }
}

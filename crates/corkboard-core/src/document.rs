//! Import document model.
//!
//! A bulk import reads one JSON document holding a nested tree of epics,
//! stories, and tasks. Only a JSON syntax error is fatal to the whole
//! document; node-level oddities (missing title, unknown type, mistyped
//! children) are handled per node during the walk, so fields here are read
//! leniently from the parsed value.

use serde_json::Value;

use crate::enums::ItemType;

/// A parsed import document.
#[derive(Debug, Clone)]
pub struct ImportDocument {
    /// Optional display name of the intended target board.
    pub board_name: Option<String>,
    /// Top-level nodes. A missing or non-list `items` field yields an empty
    /// list, which the engine reports as the "nothing to import" outcome.
    pub items: Vec<Value>,
}

impl ImportDocument {
    /// Parses raw JSON text into a document.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let root: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&root))
    }

    /// Reads the document shape out of an already-parsed value.
    pub fn from_value(root: &Value) -> Self {
        let board_name = root
            .get("boardName")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let items = list_field(root, "items");
        Self { board_name, items }
    }

    /// Returns `true` when there is nothing to import.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One node of the import tree, read leniently from its JSON value.
#[derive(Debug, Clone)]
pub struct ImportNode {
    /// The raw `type` string as supplied, if any.
    pub raw_type: Option<String>,
    /// Resolved type; `None` when `type` is missing or unrecognized.
    pub item_type: Option<ItemType>,
    /// Trimmed title; `None` when missing or empty after trimming.
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    children: Vec<Value>,
}

impl ImportNode {
    /// Reads a node out of its JSON value.
    ///
    /// Children live under a type-dependent key: epics carry `stories`,
    /// stories carry `tasks`, tasks carry neither. A missing or non-list
    /// children field means no children.
    pub fn read(value: &Value) -> Self {
        let raw_type = value
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let item_type = raw_type.as_deref().and_then(ItemType::parse);
        let title = value
            .get("title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned);
        let description = value
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let tags = match value.get("tags") {
            Some(Value::Array(list)) => list
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        };
        let children = match item_type {
            Some(ItemType::Epic) => list_field(value, "stories"),
            Some(ItemType::Story) => list_field(value, "tasks"),
            _ => Vec::new(),
        };
        Self {
            raw_type,
            item_type,
            title,
            description,
            tags,
            children,
        }
    }

    /// Child values to recurse into.
    pub fn children(&self) -> &[Value] {
        &self.children
    }

    /// Label used in diagnostics when the node is skipped.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("untitled item")
    }
}

fn list_field(value: &Value, key: &str) -> Vec<Value> {
    match value.get(key) {
        Some(Value::Array(list)) => list.clone(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(ImportDocument::parse("{not json").is_err());
    }

    #[test]
    fn missing_items_is_empty() {
        let doc = ImportDocument::parse(r#"{"boardName": "X"}"#).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.board_name.as_deref(), Some("X"));
    }

    #[test]
    fn non_list_items_is_empty() {
        let doc = ImportDocument::parse(r#"{"items": "oops"}"#).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn read_epic_node_with_stories() {
        let value = json!({
            "type": "Epic",
            "title": "  Checkout  ",
            "description": "The purchase flow",
            "tags": ["shop", 42, "q3"],
            "stories": [{"type": "story", "title": "Cart"}],
        });
        let node = ImportNode::read(&value);
        assert_eq!(node.item_type, Some(ItemType::Epic));
        // Title is trimmed, tags keep only strings in order.
        assert_eq!(node.title.as_deref(), Some("Checkout"));
        assert_eq!(node.tags, vec!["shop", "q3"]);
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn story_children_come_from_tasks_field() {
        let value = json!({
            "type": "story",
            "title": "Cart",
            "stories": [{"type": "task", "title": "ignored"}],
            "tasks": [{"type": "task", "title": "T1"}, {"type": "task", "title": "T2"}],
        });
        let node = ImportNode::read(&value);
        assert_eq!(node.item_type, Some(ItemType::Story));
        assert_eq!(node.children().len(), 2);
    }

    #[test]
    fn task_node_has_no_children() {
        let value = json!({
            "type": "task",
            "title": "T1",
            "tasks": [{"type": "task", "title": "nested"}],
        });
        let node = ImportNode::read(&value);
        assert!(node.children().is_empty());
    }

    #[test]
    fn non_list_children_treated_as_none() {
        let value = json!({"type": "epic", "title": "E", "stories": "not a list"});
        let node = ImportNode::read(&value);
        assert!(node.children().is_empty());
    }

    #[test]
    fn unknown_type_and_missing_title() {
        let value = json!({"type": "feature", "title": "   "});
        let node = ImportNode::read(&value);
        assert_eq!(node.item_type, None);
        assert_eq!(node.raw_type.as_deref(), Some("feature"));
        assert!(node.title.is_none());
        assert_eq!(node.display_title(), "untitled item");
    }
}

//! Output formatting helpers for the `cork` CLI.
//!
//! Provides JSON output, table formatting, and human-readable item display.

use serde::Serialize;
use std::io::{self, Write};

use corkboard_core::item::Item;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows.
///
/// Each row is a `Vec<String>` with columns matching the headers.
/// Column widths are computed from the data for alignment.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    // Compute column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    // Print header
    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{:<width$}", header, width = widths[i]);
    }
    let _ = writeln!(handle);

    // Print separator
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{}", "-".repeat(*width));
    }
    let _ = writeln!(handle);

    // Print rows
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                let _ = write!(handle, "  ");
            }
            if i < widths.len() {
                let _ = write!(handle, "{:<width$}", cell, width = widths[i]);
            } else {
                let _ = write!(handle, "{}", cell);
            }
        }
        let _ = writeln!(handle);
    }
}

/// Format an item as a table row: ID, TYPE, TITLE, ORDER, PARENT, TAGS.
pub fn format_item_row(item: &Item) -> Vec<String> {
    vec![
        item.id.clone(),
        item.item_type.label().to_string(),
        item.title.clone(),
        item.order_index.to_string(),
        item.parent_item_id.clone().unwrap_or_default(),
        item.tags.join(","),
    ]
}

/// Format an item in detailed multi-line view.
pub fn format_item_detail(item: &Item) -> String {
    let mut lines = Vec::new();

    lines.push(format!("{} [{}] {}", item.id, item.item_type.label(), item.title));
    lines.push(format!("Board: {}", item.board_id));
    lines.push(format!("Column: {} (position {})", item.column_id, item.order_index));
    if let Some(ref parent) = item.parent_item_id {
        lines.push(format!("Parent: {}", parent));
    }
    if !item.tags.is_empty() {
        lines.push(format!("Tags: {}", item.tags.join(", ")));
    }
    lines.push(format!(
        "Created: {} by {}",
        item.created_at.format("%Y-%m-%d %H:%M"),
        if item.created_by.is_empty() {
            "unknown"
        } else {
            &item.created_by
        }
    ));
    lines.push(format!(
        "Updated: {}",
        item.updated_at.format("%Y-%m-%d %H:%M")
    ));

    if !item.description.is_empty() {
        lines.push(String::new());
        lines.push("DESCRIPTION".to_string());
        lines.push(item.description.clone());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use corkboard_core::enums::ItemType;

    #[test]
    fn item_row_columns() {
        let item = Item {
            id: "it-abc".into(),
            title: "A story".into(),
            item_type: ItemType::Story,
            parent_item_id: Some("it-epic".into()),
            order_index: 4,
            tags: vec!["a".into(), "b".into()],
            ..Item::default()
        };
        let row = format_item_row(&item);
        assert_eq!(row, vec!["it-abc", "Story", "A story", "4", "it-epic", "a,b"]);
    }

    #[test]
    fn detail_includes_description_section() {
        let item = Item {
            id: "it-abc".into(),
            title: "T".into(),
            description: "Long text".into(),
            ..Item::default()
        };
        let detail = format_item_detail(&item);
        assert!(detail.contains("DESCRIPTION"));
        assert!(detail.contains("Long text"));
    }
}

//! The import engine: depth-first materialization of an import tree.
//!
//! Each node is handled independently of its siblings: a failure skips only
//! that node's subtree and is tallied in the report, never aborting the rest
//! of the batch. The walk is strictly sequential -- every insertion completes
//! before the next order lookup, so each node observes the orders assigned to
//! everything before it. The read-max-then-insert sequence is a known race
//! against concurrent writers on the same column and is intentionally left
//! unguarded.

use std::fmt;

use serde_json::Value;
use tracing::{debug, info, warn};

use corkboard_core::document::{ImportDocument, ImportNode};
use corkboard_core::item::NewItemBuilder;
use corkboard_storage::{Storage, StorageError};

use crate::report::{ImportOutcome, ImportReport};

/// Max characters of a node title kept in a diagnostic message.
const TITLE_TRUNCATE: usize = 20;
/// Max characters of an error description kept in a diagnostic message.
const ERROR_TRUNCATE: usize = 30;

/// Fatal import failures: nothing has been written when one of these is
/// returned. Per-node failures never surface here -- they are tallied in the
/// [`ImportReport`] instead.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The document text was not valid JSON.
    #[error("document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The target board has no columns to import into.
    #[error("board {board_id} has no columns; add one before importing")]
    NoColumns {
        /// The board that was checked.
        board_id: String,
    },

    /// A preflight storage lookup failed (missing board, connectivity).
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The import engine. Borrows a storage handle; all writes go through the
/// [`Storage`] trait.
pub struct ImportEngine<'a> {
    storage: &'a dyn Storage,
}

impl<'a> ImportEngine<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Runs a full import against a board: preflight, target column
    /// resolution, then the walk.
    ///
    /// Preflight verifies the board exists and has at least one column; the
    /// target is the column with the smallest `order_index`. Any
    /// [`ImportError`] means zero writes happened.
    pub fn run(
        &self,
        document: &ImportDocument,
        board_id: &str,
        actor: &str,
    ) -> Result<ImportOutcome, ImportError> {
        self.storage.get_board(board_id)?;

        if document.is_empty() {
            debug!(board_id, "import document has no items");
            return Ok(ImportOutcome::Nothing);
        }

        let columns = self.storage.list_columns(board_id)?;
        let Some(target) = columns.first() else {
            return Err(ImportError::NoColumns {
                board_id: board_id.to_string(),
            });
        };

        info!(
            board_id,
            column_id = %target.id,
            nodes = document.items.len(),
            "starting import"
        );
        let report = self.import(&document.items, board_id, &target.id, actor);
        info!(
            successes = report.success_count,
            failures = report.error_count,
            "import finished"
        );

        Ok(ImportOutcome::Completed(report))
    }

    /// Imports a list of top-level nodes into an explicit column.
    ///
    /// Every sibling is attempted regardless of earlier failures; the
    /// returned report is the fold of all subtree reports.
    pub fn import(
        &self,
        items: &[Value],
        board_id: &str,
        column_id: &str,
        actor: &str,
    ) -> ImportReport {
        let mut report = ImportReport::default();
        for value in items {
            report.absorb(self.import_node(value, board_id, column_id, None, actor));
        }
        report
    }

    /// Imports one node and, on success, its children with the freshly
    /// created item as their parent.
    ///
    /// Returns the subtree's report. A structural failure (unrecognized type,
    /// missing title) or an insertion failure counts exactly once and skips
    /// the whole subtree -- without a stored parent there is nothing to
    /// attach the children to.
    fn import_node(
        &self,
        value: &Value,
        board_id: &str,
        column_id: &str,
        parent_item_id: Option<&str>,
        actor: &str,
    ) -> ImportReport {
        let node = ImportNode::read(value);

        let Some(item_type) = node.item_type else {
            warn!(
                raw_type = node.raw_type.as_deref().unwrap_or("<missing>"),
                title = node.display_title(),
                "skipping node with unrecognized type"
            );
            return ImportReport::failure(format!(
                "invalid type for item \"{}\"",
                truncate(node.display_title(), TITLE_TRUNCATE)
            ));
        };

        let Some(title) = node.title.as_deref() else {
            warn!(item_type = %item_type, "skipping node without a title");
            return ImportReport::failure(format!("missing title for {item_type} node"));
        };

        // Fresh max per node: the lookup reflects every insertion completed
        // earlier in this walk, keeping order strictly increasing across the
        // whole import regardless of nesting depth.
        let order_index = match self.storage.max_order_index(board_id, column_id) {
            Ok(max) => max.map_or(0, |m| m + 1),
            Err(e) => return ImportReport::failure(failure_message(title, &e)),
        };

        let mut builder = NewItemBuilder::new(board_id, column_id, title)
            .item_type(item_type)
            .order_index(order_index)
            .tags(node.tags.clone());
        if let Some(description) = &node.description {
            builder = builder.description(description);
        }
        if let Some(parent) = parent_item_id {
            builder = builder.parent(parent);
        }

        let inserted = match self.storage.insert_item(&builder.build(), actor) {
            Ok(item) => item,
            Err(e) => {
                warn!(title, error = %e, "insertion failed, abandoning subtree");
                return ImportReport::failure(failure_message(title, &e));
            }
        };
        debug!(id = %inserted.id, order_index, "imported {item_type} \"{title}\"");

        let mut report = ImportReport::success();
        for child in node.children() {
            report.absorb(self.import_node(
                child,
                board_id,
                column_id,
                Some(&inserted.id),
                actor,
            ));
        }
        report
    }
}

/// Truncated diagnostic: up to 20 chars of title and 30 of error text.
fn failure_message(title: &str, error: &dyn fmt::Display) -> String {
    format!(
        "failed at \"{}\": {}",
        truncate(title, TITLE_TRUNCATE),
        truncate(&error.to_string(), ERROR_TRUNCATE)
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

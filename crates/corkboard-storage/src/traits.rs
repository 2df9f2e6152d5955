//! The Storage trait -- the public API for board persistence.
//!
//! Consumers (the import engine, the CLI) depend on this trait rather than on
//! the concrete SQLite implementation so that alternative backends (mocks,
//! proxies, etc.) can be substituted.

use corkboard_core::board::{Board, Column};
use corkboard_core::filter::{ItemFilter, ItemUpdates};
use corkboard_core::item::{Item, NewItem};

use crate::error::Result;

/// Outcome of deleting an item.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOutcome {
    /// Direct children whose `parent_item_id` was cleared before the delete.
    pub orphaned_children: usize,
}

/// Primary storage interface for board persistence.
///
/// All methods return [`Result`] to propagate [`StorageError`]s. Write
/// operations take the acting identity explicitly -- it is recorded on the
/// audit trail, never read from ambient state.
///
/// [`StorageError`]: crate::error::StorageError
pub trait Storage: Send + Sync {
    // -- Boards --------------------------------------------------------------

    /// Creates a new board and returns it with its assigned id.
    fn create_board(&self, name: &str, description: &str, actor: &str) -> Result<Board>;

    /// Retrieves a board by its id.
    fn get_board(&self, id: &str) -> Result<Board>;

    /// Returns all boards ordered by name.
    fn list_boards(&self) -> Result<Vec<Board>>;

    // -- Columns -------------------------------------------------------------

    /// Creates a column on a board; its `order_index` is one past the
    /// board's current maximum (0 for the first column).
    fn create_column(&self, board_id: &str, name: &str, actor: &str) -> Result<Column>;

    /// Returns a board's columns ordered ascending by `order_index`.
    fn list_columns(&self, board_id: &str) -> Result<Vec<Column>>;

    // -- Items ---------------------------------------------------------------

    /// Inserts a new item and returns the stored record with its assigned id.
    fn insert_item(&self, item: &NewItem, actor: &str) -> Result<Item>;

    /// Retrieves an item by its id.
    fn get_item(&self, id: &str) -> Result<Item>;

    /// Returns items matching the filter, ordered ascending by `order_index`.
    fn list_items(&self, filter: &ItemFilter) -> Result<Vec<Item>>;

    /// Returns the current maximum `order_index` in `(board, column)`, or
    /// `None` when the column holds no items.
    fn max_order_index(&self, board_id: &str, column_id: &str) -> Result<Option<i64>>;

    /// Applies partial updates to an item and returns the updated record.
    fn update_item(&self, id: &str, updates: &ItemUpdates, actor: &str) -> Result<Item>;

    /// Deletes a single item. Direct children are re-parented to null first;
    /// descendants beyond that are untouched.
    fn delete_item(&self, id: &str, actor: &str) -> Result<DeleteOutcome>;
}

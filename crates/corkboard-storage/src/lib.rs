//! Storage backend for the corkboard system.
//!
//! Provides the [`Storage`] trait and a SQLite implementation ([`SqliteStore`]).

pub mod error;
pub mod sqlite;
pub mod traits;

// Re-exports for convenience.
pub use error::StorageError;
pub use sqlite::SqliteStore;
pub use traits::{DeleteOutcome, Storage};

// ---------------------------------------------------------------------------
// Storage trait implementation for SqliteStore
// ---------------------------------------------------------------------------

use corkboard_core::board::{Board, Column};
use corkboard_core::filter::{ItemFilter, ItemUpdates};
use corkboard_core::item::{Item, NewItem};

use crate::error::Result;

impl Storage for SqliteStore {
    fn create_board(&self, name: &str, description: &str, actor: &str) -> Result<Board> {
        self.create_board_impl(name, description, actor)
    }

    fn get_board(&self, id: &str) -> Result<Board> {
        self.get_board_impl(id)
    }

    fn list_boards(&self) -> Result<Vec<Board>> {
        self.list_boards_impl()
    }

    fn create_column(&self, board_id: &str, name: &str, actor: &str) -> Result<Column> {
        self.create_column_impl(board_id, name, actor)
    }

    fn list_columns(&self, board_id: &str) -> Result<Vec<Column>> {
        self.list_columns_impl(board_id)
    }

    fn insert_item(&self, item: &NewItem, actor: &str) -> Result<Item> {
        self.insert_item_impl(item, actor)
    }

    fn get_item(&self, id: &str) -> Result<Item> {
        self.get_item_impl(id)
    }

    fn list_items(&self, filter: &ItemFilter) -> Result<Vec<Item>> {
        self.list_items_impl(filter)
    }

    fn max_order_index(&self, board_id: &str, column_id: &str) -> Result<Option<i64>> {
        self.max_order_index_impl(board_id, column_id)
    }

    fn update_item(&self, id: &str, updates: &ItemUpdates, actor: &str) -> Result<Item> {
        self.update_item_impl(id, updates, actor)
    }

    fn delete_item(&self, id: &str, actor: &str) -> Result<DeleteOutcome> {
        self.delete_item_impl(id, actor)
    }
}

//! Column operations for [`SqliteStore`].

use chrono::Utc;
use rusqlite::{Row, params};
use tracing::debug;

use corkboard_core::board::Column;
use corkboard_core::idgen;

use crate::error::{Result, StorageError};
use crate::sqlite::events::emit_event;
use crate::sqlite::items::{format_datetime, parse_datetime, unique_id};
use crate::sqlite::store::SqliteStore;

const COLUMN_COLUMNS: &str = "id, board_id, name, order_index, created_at";

fn scan_column(row: &Row<'_>) -> rusqlite::Result<Column> {
    let created_at_str: String = row.get("created_at")?;
    Ok(Column {
        id: row.get("id")?,
        board_id: row.get("board_id")?,
        name: row.get("name")?,
        order_index: row.get("order_index")?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl SqliteStore {
    pub(crate) fn create_column_impl(
        &self,
        board_id: &str,
        name: &str,
        actor: &str,
    ) -> Result<Column> {
        if name.trim().is_empty() {
            return Err(StorageError::validation("column name must not be empty"));
        }
        // Fail early with a not-found rather than a foreign key error.
        self.get_board_impl(board_id)?;

        let conn = self.lock_conn()?;
        let now = Utc::now();
        let now_str = format_datetime(&now);

        // Same read-then-insert ordering scheme as items within a column.
        let max: Option<i64> = conn.query_row(
            "SELECT MAX(order_index) FROM columns WHERE board_id = ?1",
            params![board_id],
            |row| row.get(0),
        )?;
        let order_index = max.map_or(0, |m| m + 1);

        let id = unique_id(&conn, "columns", idgen::prefix::COLUMN, name, actor, now)?;

        conn.execute(
            &format!("INSERT INTO columns ({COLUMN_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            params![id, board_id, name, order_index, now_str],
        )?;

        emit_event(&conn, &id, "created", actor, Some(name), &now_str)?;
        debug!(%id, board_id, order_index, "created column");

        Ok(Column {
            id,
            board_id: board_id.to_string(),
            name: name.to_string(),
            order_index,
            created_at: now,
        })
    }

    pub(crate) fn list_columns_impl(&self, board_id: &str) -> Result<Vec<Column>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMN_COLUMNS} FROM columns WHERE board_id = ?1 ORDER BY order_index ASC"
        ))?;
        let columns = stmt
            .query_map(params![board_id], scan_column)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Storage;
    use pretty_assertions::assert_eq;

    #[test]
    fn columns_get_increasing_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        let board = store.create_board("Board", "", "alice").unwrap();

        let first = store.create_column(&board.id, "Backlog", "alice").unwrap();
        let second = store.create_column(&board.id, "Doing", "alice").unwrap();
        let third = store.create_column(&board.id, "Done", "alice").unwrap();

        assert_eq!(first.order_index, 0);
        assert_eq!(second.order_index, 1);
        assert_eq!(third.order_index, 2);
    }

    #[test]
    fn list_columns_ascending() {
        let store = SqliteStore::open_in_memory().unwrap();
        let board = store.create_board("Board", "", "alice").unwrap();
        store.create_column(&board.id, "Backlog", "alice").unwrap();
        store.create_column(&board.id, "Done", "alice").unwrap();

        let names: Vec<String> = store
            .list_columns(&board.id)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Backlog", "Done"]);
    }

    #[test]
    fn create_column_on_missing_board_fails() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store.create_column("bo-nope", "Backlog", "alice").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn board_without_columns_lists_empty() {
        let store = SqliteStore::open_in_memory().unwrap();
        let board = store.create_board("Board", "", "alice").unwrap();
        assert!(store.list_columns(&board.id).unwrap().is_empty());
    }
}

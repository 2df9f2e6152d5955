//! Board operations for [`SqliteStore`].

use chrono::Utc;
use rusqlite::{Row, params};
use tracing::debug;

use corkboard_core::board::Board;
use corkboard_core::idgen;

use crate::error::{Result, StorageError};
use crate::sqlite::events::emit_event;
use crate::sqlite::items::{format_datetime, parse_datetime, unique_id};
use crate::sqlite::store::SqliteStore;

const BOARD_COLUMNS: &str = "id, name, description, created_at, created_by";

fn scan_board(row: &Row<'_>) -> rusqlite::Result<Board> {
    let created_at_str: String = row.get("created_at")?;
    Ok(Board {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get::<_, Option<String>>("description")?.unwrap_or_default(),
        created_at: parse_datetime(&created_at_str),
        created_by: row.get::<_, Option<String>>("created_by")?.unwrap_or_default(),
    })
}

impl SqliteStore {
    pub(crate) fn create_board_impl(
        &self,
        name: &str,
        description: &str,
        actor: &str,
    ) -> Result<Board> {
        if name.trim().is_empty() {
            return Err(StorageError::validation("board name must not be empty"));
        }

        let conn = self.lock_conn()?;
        let now = Utc::now();
        let now_str = format_datetime(&now);

        let id = unique_id(&conn, "boards", idgen::prefix::BOARD, name, actor, now)?;

        conn.execute(
            &format!("INSERT INTO boards ({BOARD_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            params![id, name, description, now_str, actor],
        )?;

        emit_event(&conn, &id, "created", actor, Some(name), &now_str)?;
        debug!(%id, name, "created board");

        Ok(Board {
            id,
            name: name.to_string(),
            description: description.to_string(),
            created_at: now,
            created_by: actor.to_string(),
        })
    }

    pub(crate) fn get_board_impl(&self, id: &str) -> Result<Board> {
        let conn = self.lock_conn()?;
        conn.query_row(
            &format!("SELECT {BOARD_COLUMNS} FROM boards WHERE id = ?1"),
            params![id],
            scan_board,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StorageError::not_found("board", id),
            other => StorageError::Query(other),
        })
    }

    pub(crate) fn list_boards_impl(&self) -> Result<Vec<Board>> {
        let conn = self.lock_conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {BOARD_COLUMNS} FROM boards ORDER BY name ASC"))?;
        let boards = stmt
            .query_map([], scan_board)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(boards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Storage;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_and_get_board() {
        let store = SqliteStore::open_in_memory().unwrap();
        let board = store.create_board("Roadmap", "2026 roadmap", "alice").unwrap();
        assert!(board.id.starts_with("bo-"));

        let loaded = store.get_board(&board.id).unwrap();
        assert_eq!(loaded.name, "Roadmap");
        assert_eq!(loaded.description, "2026 roadmap");
        assert_eq!(loaded.created_by, "alice");
    }

    #[test]
    fn create_board_rejects_empty_name() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store.create_board("  ", "", "alice").unwrap_err();
        assert!(matches!(err, StorageError::Validation { .. }));
    }

    #[test]
    fn list_boards_ordered_by_name() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create_board("Zulu", "", "alice").unwrap();
        store.create_board("Alpha", "", "alice").unwrap();

        let names: Vec<String> = store
            .list_boards()
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zulu"]);
    }

    #[test]
    fn get_missing_board_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get_board("bo-nope").unwrap_err().is_not_found());
    }
}

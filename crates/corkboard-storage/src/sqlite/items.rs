//! Item operations for [`SqliteStore`].

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};
use tracing::debug;

use corkboard_core::enums::ItemType;
use corkboard_core::filter::{ItemFilter, ItemUpdates};
use corkboard_core::idgen;
use corkboard_core::item::{Item, NewItem};

use crate::error::{Result, StorageError};
use crate::sqlite::events::emit_event;
use crate::sqlite::store::SqliteStore;
use crate::traits::DeleteOutcome;

/// All item columns in a deterministic order for SELECT queries.
pub(crate) const ITEM_COLUMNS: &str = "id, board_id, column_id, title, description, item_type, \
     parent_item_id, order_index, tags, created_at, created_by, updated_at";

/// Deserialises a row into an [`Item`].
///
/// The column order MUST match [`ITEM_COLUMNS`].
pub(crate) fn scan_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    let item_type_str: String = row.get("item_type")?;
    let tags_str: String = row.get("tags")?;
    let created_at_str: String = row.get("created_at")?;
    let updated_at_str: String = row.get("updated_at")?;

    // An unknown stored type should never happen (the closed enum gates every
    // write path); fall back to task rather than poisoning the whole scan.
    let item_type = ItemType::parse(&item_type_str).unwrap_or(ItemType::Task);
    let tags: Vec<String> = serde_json::from_str(&tags_str).unwrap_or_default();

    Ok(Item {
        id: row.get("id")?,
        board_id: row.get("board_id")?,
        column_id: row.get("column_id")?,
        title: row.get("title")?,
        description: row.get::<_, Option<String>>("description")?.unwrap_or_default(),
        item_type,
        parent_item_id: row.get("parent_item_id")?,
        order_index: row.get("order_index")?,
        tags,
        created_at: parse_datetime(&created_at_str),
        created_by: row.get::<_, Option<String>>("created_by")?.unwrap_or_default(),
        updated_at: parse_datetime(&updated_at_str),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Formats a `DateTime<Utc>` as ISO 8601 TEXT for SQLite.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Parses an ISO 8601 TEXT string from SQLite into a `DateTime<Utc>`.
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    s.parse::<DateTime<Utc>>().unwrap_or_else(|_| {
        chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
            .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
            .map(|ndt| ndt.and_utc())
            .unwrap_or_else(|_| Utc::now())
    })
}

/// Generates a hash id with the given prefix that does not collide with an
/// existing row in `table`.
pub(crate) fn unique_id(
    conn: &Connection,
    table: &str,
    prefix: &str,
    seed: &str,
    actor: &str,
    now: DateTime<Utc>,
) -> Result<String> {
    for nonce in 0..10 {
        let candidate = idgen::generate_id(prefix, seed, actor, now, nonce);
        let exists: bool = conn
            .query_row(
                &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)"),
                params![candidate],
                |row| row.get(0),
            )
            .unwrap_or(false);
        if !exists {
            return Ok(candidate);
        }
    }
    Err(StorageError::Internal(format!(
        "failed to generate unique {table} id after 10 attempts"
    )))
}

// ---------------------------------------------------------------------------
// SqliteStore item methods
// ---------------------------------------------------------------------------

impl SqliteStore {
    pub(crate) fn insert_item_impl(&self, item: &NewItem, actor: &str) -> Result<Item> {
        if item.title.trim().is_empty() {
            return Err(StorageError::validation("item title must not be empty"));
        }

        let conn = self.lock_conn()?;
        let now = Utc::now();
        let now_str = format_datetime(&now);

        let id = unique_id(&conn, "items", idgen::prefix::ITEM, &item.title, actor, now)?;
        let tags_str = serde_json::to_string(&item.tags)?;

        conn.execute(
            &format!(
                "INSERT INTO items ({ITEM_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
            ),
            params![
                id,
                item.board_id,
                item.column_id,
                item.title,
                item.description,
                item.item_type.as_str(),
                item.parent_item_id,
                item.order_index,
                tags_str,
                now_str,
                actor,
                now_str,
            ],
        )?;

        emit_event(&conn, &id, "created", actor, Some(&item.title), &now_str)?;
        debug!(%id, order_index = item.order_index, "inserted item");

        Ok(Item {
            id,
            board_id: item.board_id.clone(),
            column_id: item.column_id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            item_type: item.item_type,
            parent_item_id: item.parent_item_id.clone(),
            order_index: item.order_index,
            tags: item.tags.clone(),
            created_at: now,
            created_by: actor.to_string(),
            updated_at: now,
        })
    }

    pub(crate) fn get_item_impl(&self, id: &str) -> Result<Item> {
        let conn = self.lock_conn()?;
        conn.query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
            params![id],
            scan_item,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StorageError::not_found("item", id),
            other => StorageError::Query(other),
        })
    }

    pub(crate) fn list_items_impl(&self, filter: &ItemFilter) -> Result<Vec<Item>> {
        let conn = self.lock_conn()?;

        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(ref board_id) = filter.board_id {
            conditions.push(format!("board_id = ?{}", params.len() + 1));
            params.push(Box::new(board_id.clone()));
        }
        if let Some(ref column_id) = filter.column_id {
            conditions.push(format!("column_id = ?{}", params.len() + 1));
            params.push(Box::new(column_id.clone()));
        }
        if let Some(item_type) = filter.item_type {
            conditions.push(format!("item_type = ?{}", params.len() + 1));
            params.push(Box::new(item_type.as_str().to_string()));
        }
        if let Some(ref parent) = filter.parent_item_id {
            conditions.push(format!("parent_item_id = ?{}", params.len() + 1));
            params.push(Box::new(parent.clone()));
        }
        if filter.no_parent {
            conditions.push("parent_item_id IS NULL".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = match filter.limit {
            Some(limit) if limit > 0 => format!("LIMIT {limit}"),
            _ => String::new(),
        };

        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM items {where_clause} \
             ORDER BY order_index ASC, created_at ASC {limit_clause}"
        );

        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            params.iter().map(|p| p.as_ref()).collect();
        let items = stmt
            .query_map(param_refs.as_slice(), scan_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    pub(crate) fn max_order_index_impl(
        &self,
        board_id: &str,
        column_id: &str,
    ) -> Result<Option<i64>> {
        let conn = self.lock_conn()?;
        let max: Option<i64> = conn.query_row(
            "SELECT MAX(order_index) FROM items WHERE board_id = ?1 AND column_id = ?2",
            params![board_id, column_id],
            |row| row.get(0),
        )?;
        Ok(max)
    }

    pub(crate) fn update_item_impl(
        &self,
        id: &str,
        updates: &ItemUpdates,
        actor: &str,
    ) -> Result<Item> {
        if updates.is_empty() {
            return self.get_item_impl(id);
        }

        {
            let conn = self.lock_conn()?;
            let now_str = format_datetime(&Utc::now());

            let mut sets: Vec<String> = Vec::new();
            let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

            if let Some(ref title) = updates.title {
                if title.trim().is_empty() {
                    return Err(StorageError::validation("item title must not be empty"));
                }
                sets.push(format!("title = ?{}", params.len() + 1));
                params.push(Box::new(title.clone()));
            }
            if let Some(ref description) = updates.description {
                sets.push(format!("description = ?{}", params.len() + 1));
                params.push(Box::new(description.clone()));
            }
            if let Some(ref tags) = updates.tags {
                sets.push(format!("tags = ?{}", params.len() + 1));
                params.push(Box::new(serde_json::to_string(tags)?));
            }

            sets.push(format!("updated_at = ?{}", params.len() + 1));
            params.push(Box::new(now_str.clone()));

            params.push(Box::new(id.to_string()));
            let sql = format!(
                "UPDATE items SET {} WHERE id = ?{}",
                sets.join(", "),
                params.len()
            );

            let param_refs: Vec<&dyn rusqlite::types::ToSql> =
                params.iter().map(|p| p.as_ref()).collect();
            let changed = conn.execute(&sql, param_refs.as_slice())?;
            if changed == 0 {
                return Err(StorageError::not_found("item", id));
            }

            emit_event(&conn, id, "updated", actor, None, &now_str)?;
        }

        self.get_item_impl(id)
    }

    pub(crate) fn delete_item_impl(&self, id: &str, actor: &str) -> Result<DeleteOutcome> {
        let conn = self.lock_conn()?;
        let now_str = format_datetime(&Utc::now());

        // Re-parent direct children to null before removing the record, so
        // the delete never dangles a foreign key. Grandchildren keep their
        // (still valid) parents.
        let orphaned_children = conn.execute(
            "UPDATE items SET parent_item_id = NULL WHERE parent_item_id = ?1",
            params![id],
        )?;

        let deleted = conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StorageError::not_found("item", id));
        }

        emit_event(&conn, id, "deleted", actor, None, &now_str)?;
        debug!(%id, orphaned_children, "deleted item");

        Ok(DeleteOutcome { orphaned_children })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Storage;
    use corkboard_core::item::NewItemBuilder;
    use pretty_assertions::assert_eq;

    /// Creates a store with one board and two columns, returning their ids.
    fn seeded_store() -> (SqliteStore, String, String, String) {
        let store = SqliteStore::open_in_memory().unwrap();
        let board = store.create_board("Test board", "", "tester").unwrap();
        let backlog = store.create_column(&board.id, "Backlog", "tester").unwrap();
        let doing = store.create_column(&board.id, "Doing", "tester").unwrap();
        (store, board.id, backlog.id, doing.id)
    }

    #[test]
    fn insert_assigns_id_and_roundtrips() {
        let (store, board, backlog, _) = seeded_store();
        let new = NewItemBuilder::new(&board, &backlog, "First item")
            .item_type(ItemType::Epic)
            .tags(vec!["a".into(), "b".into()])
            .build();
        let item = store.insert_item(&new, "tester").unwrap();
        assert!(item.id.starts_with("it-"));

        let loaded = store.get_item(&item.id).unwrap();
        assert_eq!(loaded.title, "First item");
        assert_eq!(loaded.item_type, ItemType::Epic);
        assert_eq!(loaded.tags, vec!["a", "b"]);
        assert_eq!(loaded.order_index, 0);
        assert_eq!(loaded.created_by, "tester");
    }

    #[test]
    fn insert_rejects_empty_title() {
        let (store, board, backlog, _) = seeded_store();
        let new = NewItemBuilder::new(&board, &backlog, "   ").build();
        let err = store.insert_item(&new, "tester").unwrap_err();
        assert!(matches!(err, StorageError::Validation { .. }));
    }

    #[test]
    fn max_order_index_is_column_scoped() {
        let (store, board, backlog, doing) = seeded_store();
        assert_eq!(store.max_order_index(&board, &backlog).unwrap(), None);

        for order in 0..3 {
            let new = NewItemBuilder::new(&board, &backlog, format!("item {order}"))
                .order_index(order)
                .build();
            store.insert_item(&new, "tester").unwrap();
        }

        assert_eq!(store.max_order_index(&board, &backlog).unwrap(), Some(2));
        assert_eq!(store.max_order_index(&board, &doing).unwrap(), None);
    }

    #[test]
    fn list_items_filters_and_orders() {
        let (store, board, backlog, doing) = seeded_store();
        for (title, column, order) in [("c", &backlog, 2), ("a", &backlog, 0), ("b", &doing, 1)] {
            let new = NewItemBuilder::new(&board, column.as_str(), title)
                .order_index(order)
                .build();
            store.insert_item(&new, "tester").unwrap();
        }

        let all = store.list_items(&ItemFilter::for_board(&board)).unwrap();
        let titles: Vec<&str> = all.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);

        let filter = ItemFilter {
            board_id: Some(board.clone()),
            column_id: Some(backlog.clone()),
            ..ItemFilter::default()
        };
        let backlog_items = store.list_items(&filter).unwrap();
        assert_eq!(backlog_items.len(), 2);
    }

    #[test]
    fn list_items_by_parent_and_no_parent() {
        let (store, board, backlog, _) = seeded_store();
        let epic = store
            .insert_item(
                &NewItemBuilder::new(&board, &backlog, "Epic")
                    .item_type(ItemType::Epic)
                    .build(),
                "tester",
            )
            .unwrap();
        for (title, order) in [("S1", 1), ("S2", 2)] {
            store
                .insert_item(
                    &NewItemBuilder::new(&board, &backlog, title)
                        .item_type(ItemType::Story)
                        .parent(&epic.id)
                        .order_index(order)
                        .build(),
                    "tester",
                )
                .unwrap();
        }

        let children = store
            .list_items(&ItemFilter {
                board_id: Some(board.clone()),
                parent_item_id: Some(epic.id.clone()),
                ..ItemFilter::default()
            })
            .unwrap();
        assert_eq!(children.len(), 2);

        let roots = store
            .list_items(&ItemFilter {
                board_id: Some(board.clone()),
                no_parent: true,
                ..ItemFilter::default()
            })
            .unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].title, "Epic");

        let limited = store
            .list_items(&ItemFilter {
                board_id: Some(board),
                limit: Some(2),
                ..ItemFilter::default()
            })
            .unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn update_applies_only_some_fields() {
        let (store, board, backlog, _) = seeded_store();
        let new = NewItemBuilder::new(&board, &backlog, "Original")
            .description("keep me")
            .build();
        let item = store.insert_item(&new, "tester").unwrap();

        let updates = ItemUpdates {
            title: Some("Renamed".into()),
            ..ItemUpdates::default()
        };
        let updated = store.update_item(&item.id, &updates, "tester").unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, "keep me");
    }

    #[test]
    fn update_missing_item_is_not_found() {
        let (store, ..) = seeded_store();
        let updates = ItemUpdates {
            title: Some("x".into()),
            ..ItemUpdates::default()
        };
        let err = store.update_item("it-missing", &updates, "tester").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn delete_reparents_direct_children() {
        let (store, board, backlog, _) = seeded_store();
        let story = store
            .insert_item(
                &NewItemBuilder::new(&board, &backlog, "Story")
                    .item_type(ItemType::Story)
                    .build(),
                "tester",
            )
            .unwrap();
        let task = store
            .insert_item(
                &NewItemBuilder::new(&board, &backlog, "Task")
                    .item_type(ItemType::Task)
                    .parent(&story.id)
                    .order_index(1)
                    .build(),
                "tester",
            )
            .unwrap();

        let outcome = store.delete_item(&story.id, "tester").unwrap();
        assert_eq!(outcome.orphaned_children, 1);

        let orphan = store.get_item(&task.id).unwrap();
        assert!(orphan.parent_item_id.is_none());
        assert!(store.get_item(&story.id).unwrap_err().is_not_found());
    }

    #[test]
    fn events_recorded_with_actor() {
        let (store, board, backlog, _) = seeded_store();
        let item = store
            .insert_item(&NewItemBuilder::new(&board, &backlog, "Audited").build(), "alice")
            .unwrap();
        store.delete_item(&item.id, "bob").unwrap();

        let conn = store.lock_conn().unwrap();
        let actors: Vec<String> = conn
            .prepare("SELECT actor FROM events WHERE entity_id = ?1 ORDER BY id")
            .unwrap()
            .query_map(params![item.id], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert_eq!(actors, vec!["alice", "bob"]);
    }
}

//! Audit trail helpers.

use rusqlite::{Connection, params};

use crate::error::Result;

/// Emits an event row into the events table.
pub(crate) fn emit_event(
    conn: &Connection,
    entity_id: &str,
    event_type: &str,
    actor: &str,
    detail: Option<&str>,
    created_at: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO events (entity_id, event_type, actor, detail, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![entity_id, event_type, actor, detail, created_at],
    )?;
    Ok(())
}

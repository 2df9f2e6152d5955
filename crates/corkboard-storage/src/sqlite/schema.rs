//! DDL statements and migrations for the SQLite schema.
//!
//! Timestamps are stored as TEXT in ISO 8601 format (SQLite has no native
//! datetime type). The `tags` column is a JSON array stored as TEXT.

/// Current schema version. Bumped whenever DDL or migrations change.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Core DDL statements executed during `init_schema`.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    // -- Boards table --------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS boards (
        id          TEXT PRIMARY KEY,
        name        TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        created_by  TEXT DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_boards_name ON boards(name)",
    // -- Columns table -------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS columns (
        id          TEXT PRIMARY KEY,
        board_id    TEXT NOT NULL,
        name        TEXT NOT NULL,
        order_index INTEGER NOT NULL DEFAULT 0,
        created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        FOREIGN KEY (board_id) REFERENCES boards(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_columns_board ON columns(board_id)",
    "CREATE INDEX IF NOT EXISTS idx_columns_board_order ON columns(board_id, order_index)",
    // -- Items table ---------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id             TEXT PRIMARY KEY,
        board_id       TEXT NOT NULL,
        column_id      TEXT NOT NULL,
        title          TEXT NOT NULL,
        description    TEXT NOT NULL DEFAULT '',
        item_type      TEXT NOT NULL DEFAULT 'task',
        parent_item_id TEXT,
        order_index    INTEGER NOT NULL DEFAULT 0,
        -- Ordered tag list (JSON array)
        tags           TEXT NOT NULL DEFAULT '[]',
        created_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        created_by     TEXT DEFAULT '',
        updated_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        FOREIGN KEY (board_id) REFERENCES boards(id) ON DELETE CASCADE,
        FOREIGN KEY (column_id) REFERENCES columns(id) ON DELETE CASCADE,
        FOREIGN KEY (parent_item_id) REFERENCES items(id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_items_board ON items(board_id)",
    "CREATE INDEX IF NOT EXISTS idx_items_column_order ON items(board_id, column_id, order_index)",
    "CREATE INDEX IF NOT EXISTS idx_items_type ON items(item_type)",
    "CREATE INDEX IF NOT EXISTS idx_items_parent ON items(parent_item_id)",
    // -- Events table (audit trail) ------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS events (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        entity_id   TEXT NOT NULL,
        event_type  TEXT NOT NULL,
        actor       TEXT NOT NULL,
        detail      TEXT,
        created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_events_entity ON events(entity_id)",
    "CREATE INDEX IF NOT EXISTS idx_events_created_at ON events(created_at)",
    // -- Config table --------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS config (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
    "#,
    // -- Metadata table ------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS metadata (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
    "#,
];

/// Default configuration values inserted on first init.
///
/// Board selection defaults live in `.corkboard/config.yaml`, not here; this
/// table carries database-level settings only.
pub const DEFAULT_CONFIG: &[(&str, &str)] = &[];

/// Schema migrations applied after initial DDL.
///
/// Each migration is a `(name, sql)` pair. Migrations are tracked in the
/// `metadata` table under the key `migration:<name>` so they run at most once.
pub const MIGRATIONS: &[(&str, &str)] = &[
    // Future migrations go here, e.g.:
    // ("001_add_color_column", "ALTER TABLE columns ADD COLUMN color TEXT DEFAULT ''"),
];

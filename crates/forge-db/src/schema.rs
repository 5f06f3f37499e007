//! # Reference Schema
//!
//! The DDL for the tables the repositories operate on, used by the seed
//! binary and the test suite. Production deployments own their schema
//! through their migration tooling — the repositories assume the tables
//! already exist and never check.
//!
//! Conventions baked into the DDL:
//! - identity is `INTEGER PRIMARY KEY AUTOINCREMENT`
//! - `created_at` defaults to an RFC 3339 UTC timestamp on the store side
//! - booleans are INTEGER 0/1

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Schema for every entity table, idempotent (`IF NOT EXISTS`).
pub const REFERENCE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT    NOT NULL,
    last_name   TEXT    NOT NULL,
    email       TEXT    NOT NULL UNIQUE,
    mobile      TEXT,
    is_admin    INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    company     TEXT,
    price_cents INTEGER NOT NULL DEFAULT 0,
    stock       INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS cash (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    amount      INTEGER NOT NULL,
    purpose     TEXT,
    created_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS tools (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    code        TEXT,
    archived    INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS mechanics (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT    NOT NULL,
    last_name   TEXT    NOT NULL,
    mobile      TEXT,
    created_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS usages (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    tool_id     INTEGER NOT NULL REFERENCES tools (id),
    mechanic_id INTEGER NOT NULL REFERENCES mechanics (id),
    taken_at    TEXT    NOT NULL,
    returned_at TEXT,
    created_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_usages_tool ON usages (tool_id);
CREATE INDEX IF NOT EXISTS idx_usages_mechanic ON usages (mechanic_id);
"#;

/// Applies the reference schema to a database.
///
/// Idempotent; intended for development databases and tests.
pub async fn apply(pool: &SqlitePool) -> DbResult<()> {
    info!("Applying reference schema");
    sqlx::raw_sql(REFERENCE_SCHEMA).execute(pool).await?;
    Ok(())
}

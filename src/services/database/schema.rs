use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_kv_table(conn)?;
    run_kv_migrations(conn)?;
    Ok(())
}

fn create_kv_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create kv_store table")?;

    Ok(())
}

// Older tables lack updated_at; ALTER TABLE only accepts a constant default.
fn run_kv_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "kv_store",
        "updated_at",
        "ALTER TABLE kv_store ADD COLUMN updated_at TEXT NOT NULL DEFAULT '1970-01-01 00:00:00'",
    )?;

    Ok(())
}

//! Key-value persistence for the engine's entities.
//!
//! Each collection is stored whole as one JSON value under its own key and
//! rewritten in full on every change. There is no partial update and no
//! locking; the last write wins.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::error::RentalError;
use crate::services::database::Database;

pub const RENTAL_PERIOD_KEY: &str = "rentalPeriod";
pub const APPLICATIONS_KEY: &str = "applications";
pub const WINNING_HISTORY_KEY: &str = "winningHistory";

/// String-keyed store of serialized JSON values.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Volatile store for tests and sessions that should not touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Store backed by the `kv_store` table.
pub struct SqliteStore<'a> {
    db: &'a Database,
}

impl<'a> SqliteStore<'a> {
    /// The schema must already be initialized.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

impl<'a> KeyValueStore for SqliteStore<'a> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.db
            .connection()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read '{}'", key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .connection()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = CURRENT_TIMESTAMP",
                params![key, value],
            )
            .with_context(|| format!("Failed to write '{}'", key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db
            .connection()
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .with_context(|| format!("Failed to remove '{}'", key))?;
        Ok(())
    }
}

/// Serialize `value` and write it under `key`.
pub fn save<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let data = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize '{}'", key))?;
    store.set(key, &data)
}

/// Decode a stored JSON value.
pub fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, RentalError> {
    serde_json::from_str(raw).map_err(|err| RentalError::InvalidPersistedState {
        key: key.to_string(),
        reason: err.to_string(),
    })
}

/// Read and decode `key`. Absent keys yield `None`; a corrupt value is
/// logged and treated as absent.
pub fn load_lenient<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match decode(key, &raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            log::warn!("Discarding stored value: {}", err);
            Ok(None)
        }
    }
}

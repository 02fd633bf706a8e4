//! Local durable storage for the todo collection.
//!
//! # Responsibility
//! - Persist the full collection wholesale under one storage key.
//! - Load tolerantly: corrupt or absent data yields an empty collection.
//!
//! # Invariants
//! - `save` overwrites the stored entry completely; there are no partial
//!   writes.
//! - `load` never fails; unreadable state is treated as empty.

use crate::db::{open_db, open_db_in_memory};
use crate::model::todo::Todo;
use crate::persist::PersistResult;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const STORAGE_KEY: &str = "todos";

/// SQLite-backed keyed store holding one serialized collection entry.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Wraps an already bootstrapped connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) the on-disk store at `path`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a private in-memory store.
    pub fn in_memory() -> PersistResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Loads the stored collection.
    ///
    /// Absent, unreadable or corrupt data loads as an empty collection;
    /// the failure is logged, never surfaced.
    pub fn load(&self) -> Vec<Todo> {
        let stored: Option<String> = match self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1;",
                [STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()
        {
            Ok(value) => value,
            Err(err) => {
                warn!("event=load module=persist status=warn reason=read_failed error={err}");
                return Vec::new();
            }
        };

        let Some(raw) = stored else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(todos) => todos,
            Err(err) => {
                warn!("event=load module=persist status=warn reason=corrupt_data error={err}");
                Vec::new()
            }
        }
    }

    /// Serializes and overwrites the stored collection wholesale.
    pub fn save(&self, todos: &[Todo]) -> PersistResult<()> {
        let serialized = serde_json::to_string(todos)?;
        self.conn.execute(
            "INSERT INTO app_state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![STORAGE_KEY, serialized],
        )?;
        Ok(())
    }

    /// Removes the stored entry entirely.
    pub fn clear(&self) -> PersistResult<()> {
        self.conn
            .execute("DELETE FROM app_state WHERE key = ?1;", [STORAGE_KEY])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalStore, STORAGE_KEY};
    use crate::model::todo::{Priority, Todo};
    use rusqlite::params;

    #[test]
    fn load_returns_empty_for_fresh_store() {
        let store = LocalStore::in_memory().unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_roundtrips_field_for_field() {
        let store = LocalStore::in_memory().unwrap();
        let mut second = Todo::with_id("b", "second", Priority::Low);
        second.completed = true;
        second.created_at = Some(42);
        let todos = vec![Todo::with_id("a", "first", Priority::High), second];

        store.save(&todos).unwrap();
        assert_eq!(store.load(), todos);
    }

    #[test]
    fn save_overwrites_wholesale() {
        let store = LocalStore::in_memory().unwrap();
        store
            .save(&[
                Todo::with_id("a", "first", Priority::Medium),
                Todo::with_id("b", "second", Priority::Medium),
            ])
            .unwrap();
        store
            .save(&[Todo::with_id("b", "second", Priority::Medium)])
            .unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "b");
    }

    #[test]
    fn corrupt_entry_loads_as_empty() {
        let store = LocalStore::in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO app_state (key, value) VALUES (?1, ?2);",
                params![STORAGE_KEY, "{not json"],
            )
            .unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn clear_removes_the_entry() {
        let store = LocalStore::in_memory().unwrap();
        store
            .save(&[Todo::with_id("a", "first", Priority::Medium)])
            .unwrap();

        store.clear().unwrap();
        assert!(store.load().is_empty());
    }
}

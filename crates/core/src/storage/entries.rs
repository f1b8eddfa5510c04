//! Key-value entry storage
//!
//! SQLite-backed entries plus an in-memory fallback used when no database is
//! available.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::instrument;

use super::traits::KeyValueStore;
use crate::error::Result;

/// Entry store over an open SQLite connection
pub struct EntryStore<'a> {
    conn: &'a Connection,
}

impl<'a> EntryStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Load the payload stored under a key
    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or replace a payload, bumping its revision
    #[instrument(skip(self, value), fields(bytes = value.len()))]
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at, revision) VALUES (?1, ?2, ?3, 1)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at,
                revision = kv_entries.revision + 1",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Number of writes recorded for a key
    pub fn revision(&self, key: &str) -> Result<Option<u64>> {
        let revision = self
            .conn
            .query_row(
                "SELECT revision FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(revision.map(|r| r.max(0) as u64))
    }
}

/// Ephemeral backend; contents vanish with the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    #[test]
    fn test_entry_set_get() {
        let db = Database::open_in_memory().unwrap();
        let store = EntryStore::new(&db.conn);

        store.set("events", "[]").unwrap();
        assert_eq!(store.get("events").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_entry_not_found() {
        let db = Database::open_in_memory().unwrap();
        let store = EntryStore::new(&db.conn);

        assert!(store.get("missing").unwrap().is_none());
        assert!(store.revision("missing").unwrap().is_none());
    }

    #[test]
    fn test_entry_overwrite_bumps_revision() {
        let db = Database::open_in_memory().unwrap();
        let store = EntryStore::new(&db.conn);

        store.set("events", "[1]").unwrap();
        store.set("events", "[2]").unwrap();

        assert_eq!(store.get("events").unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.revision("events").unwrap(), Some(2));
    }

    #[test]
    fn test_entry_remove() {
        let db = Database::open_in_memory().unwrap();
        let store = EntryStore::new(&db.conn);

        store.set("events", "[]").unwrap();
        store.remove("events").unwrap();
        store.remove("events").unwrap();
        assert!(store.get("events").unwrap().is_none());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));

        store.remove("a").unwrap();
        assert!(store.get("a").unwrap().is_none());
    }
}

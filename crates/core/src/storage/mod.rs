//! Storage layer for Chorale
//!
//! A SQLite database of JSON payloads addressed by string key, plus the
//! tolerant load/save helpers the event store persists through.

mod entries;
mod migrations;
pub(crate) mod parse;
mod persist;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;

use crate::error::Result;

pub use entries::{EntryStore, MemoryStore};
pub use persist::{load_or_default, save};
pub use traits::KeyValueStore;

/// Key holding the serialized event collection
pub const EVENTS_KEY: &str = "events";

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        migrations::current_version(&self.conn).unwrap_or(0)
    }

    /// Get the key-value entry store
    pub fn entries(&self) -> EntryStore<'_> {
        EntryStore::new(&self.conn)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.entries().get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key)
    }
}

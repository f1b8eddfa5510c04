//! Storage backend trait
//!
//! The event store only needs string keys mapped to JSON text, so any backend
//! offering get/set/remove can hold it (SQLite on disk, memory in tests).

use crate::error::Result;

/// Key-value backend operations
pub trait KeyValueStore {
    /// Read the raw payload stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous payload
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the payload stored under `key` (missing keys are not an error)
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

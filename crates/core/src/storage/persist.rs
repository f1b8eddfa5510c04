//! Tolerant persistence helpers
//!
//! Reads degrade to a caller-supplied default; writes report failure as a
//! value and never panic. The application keeps working on in-memory state
//! when storage is missing, corrupt or full.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::traits::KeyValueStore;
use crate::error::{Error, Result};

/// Load the value under `key`, or `default` on a missing key, unparseable
/// payload or backend failure.
pub fn load_or_default<S, T>(store: &S, key: &str, default: T) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => {
            debug!(key, "No stored value, using default");
            return default;
        }
        Err(e) => {
            warn!(key, error = %e, "Storage read failed, using default");
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Stored value is corrupt, using default");
            default
        }
    }
}

/// Serialize `value` as JSON and write it under `key`.
///
/// Any failure comes back as [`Error::Persistence`]; callers decide whether
/// to log it.
pub fn save<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let payload =
        serde_json::to_string(value).map_err(|e| Error::Persistence(e.to_string()))?;
    store
        .set(key, &payload)
        .map_err(|e| Error::Persistence(format!("write of {key} failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, MemoryStore};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Persistence("disabled".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Persistence("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(Error::Persistence("disabled".into()))
        }
    }

    #[test]
    fn missing_key_returns_default() {
        let store = MemoryStore::new();
        let value: Vec<u32> = load_or_default(&store, "nums", vec![7]);
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn round_trip_through_sqlite() {
        let db = Database::open_in_memory().unwrap();
        let original = vec!["a".to_string(), "b".to_string()];

        save(&db, "letters", &original).unwrap();
        let loaded: Vec<String> = load_or_default(&db, "letters", Vec::new());
        assert_eq!(loaded, original);
    }

    #[test]
    fn corrupt_payload_returns_default() {
        let store = MemoryStore::new();
        store.set("nums", "{not json").unwrap();

        let value: Vec<u32> = load_or_default(&store, "nums", vec![1, 2]);
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn wrong_shape_returns_default() {
        let store = MemoryStore::new();
        store.set("nums", r#"{"a": 1}"#).unwrap();

        let value: Vec<u32> = load_or_default(&store, "nums", Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn backend_failures_do_not_panic() {
        let value: Vec<u32> = load_or_default(&BrokenStore, "nums", vec![3]);
        assert_eq!(value, vec![3]);

        let err = save(&BrokenStore, "nums", &vec![1]).unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
    }
}

//! StateStore — redb-backed key-value persistence for sitewatch.
//!
//! Provides string-keyed get/put/delete with an optional TTL per entry.
//! Values are JSON-serialized envelopes in redb's `&[u8]` value column.
//! The store supports both on-disk and in-memory backends (the latter
//! for testing).

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use redb::{Database, ReadableDatabase};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::tables::ENTRIES;

/// Convert any `Display` error into a `StateError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StateError::$variant(e.to_string())
    };
}

/// Stored record: the value string plus an optional absolute expiry.
///
/// Expiry is passive: `get` treats an entry past its `expires_at` as
/// absent, and the row is simply overwritten by the next `put` under the
/// same key. Nothing vacuums expired rows.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Envelope {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
}

/// Thread-safe key-value store backed by redb.
#[derive(Clone)]
pub struct StateStore {
    db: Arc<Database>,
}

impl StateStore {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StateResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "state store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> StateResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory state store opened");
        Ok(store)
    }

    /// Create the entries table if it doesn't exist yet.
    fn ensure_tables(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(ENTRIES).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    /// Read the value stored under `key`.
    ///
    /// Returns `None` for missing keys and for entries whose TTL has
    /// elapsed.
    pub fn get(&self, key: &str) -> StateResult<Option<String>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(ENTRIES).map_err(map_err!(Table))?;
        match table.get(key).map_err(map_err!(Read))? {
            Some(guard) => {
                let envelope: Envelope =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                if let Some(expires_at) = envelope.expires_at {
                    if epoch_ms() >= expires_at {
                        debug!(%key, "entry expired");
                        return Ok(None);
                    }
                }
                Ok(Some(envelope.value))
            }
            None => Ok(None),
        }
    }

    /// Insert or replace the value under `key`.
    ///
    /// A `ttl` of `Some(d)` marks the entry as expired once `d` has
    /// elapsed; `None` stores it without expiry.
    pub fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> StateResult<()> {
        let envelope = Envelope {
            value: value.to_string(),
            expires_at: ttl.map(|d| epoch_ms() + d.as_millis() as u64),
        };
        let bytes = serde_json::to_vec(&envelope).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(ENTRIES).map_err(map_err!(Table))?;
            table
                .insert(key, bytes.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, "entry stored");
        Ok(())
    }

    /// Delete the entry under `key`. Returns true if it existed.
    pub fn delete(&self, key: &str) -> StateResult<bool> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut table = txn.open_table(ENTRIES).map_err(map_err!(Table))?;
            existed = table.remove(key).map_err(map_err!(Write))?.is_some();
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, existed, "entry deleted");
        Ok(existed)
    }
}

/// Milliseconds since the Unix epoch.
pub fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let store = StateStore::open_in_memory().unwrap();
        store.put("sites", r#"["example.com"]"#, None).unwrap();
        assert_eq!(
            store.get("sites").unwrap().as_deref(),
            Some(r#"["example.com"]"#)
        );
    }

    #[test]
    fn missing_key_reads_none() {
        let store = StateStore::open_in_memory().unwrap();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn put_replaces_existing() {
        let store = StateStore::open_in_memory().unwrap();
        store.put("k", "one", None).unwrap();
        store.put("k", "two", None).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn delete_reports_existence() {
        let store = StateStore::open_in_memory().unwrap();
        store.put("k", "v", None).unwrap();
        assert!(store.delete("k").unwrap());
        assert!(!store.delete("k").unwrap());
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn zero_ttl_reads_as_absent() {
        let store = StateStore::open_in_memory().unwrap();
        store.put("k", "v", Some(Duration::ZERO)).unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn future_ttl_still_readable() {
        let store = StateStore::open_in_memory().unwrap();
        store.put("k", "v", Some(Duration::from_secs(3600))).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn expired_entry_can_be_overwritten() {
        let store = StateStore::open_in_memory().unwrap();
        store.put("k", "old", Some(Duration::ZERO)).unwrap();
        store.put("k", "new", None).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitewatch.redb");
        {
            let store = StateStore::open(&path).unwrap();
            store.put("k", "v", None).unwrap();
        }
        let store = StateStore::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}

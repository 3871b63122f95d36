//! Key-value store contract and implementations.
//!
//! # Responsibility
//! - Store JSON text under string keys.
//! - Offer typed `load`/`save` with the fail-open read policy and the
//!   swallow-on-failure write policy.
//!
//! # Invariants
//! - `load` on an absent or undecodable key returns the caller default.
//! - `save` overwrites unconditionally; on failure the previous value stays.
//! - Failures are logged with metadata only, never with stored values.

use crate::db::{self, DbError, SharedConnection};
use log::warn;
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

pub type KvResult<T> = Result<T, KvError>;

/// Raw key-value store failure.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    Serde(serde_json::Error),
    CapacityExceeded {
        key: String,
        required_bytes: usize,
        capacity_bytes: usize,
    },
    Poisoned,
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serde(err) => write!(f, "value encoding failed: {err}"),
            Self::CapacityExceeded {
                key,
                required_bytes,
                capacity_bytes,
            } => write!(
                f,
                "storage capacity exceeded writing `{key}`: need {required_bytes} bytes, capacity {capacity_bytes}"
            ),
            Self::Poisoned => write!(f, "key-value store lock is poisoned"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serde(err) => Some(err),
            Self::CapacityExceeded { .. } | Self::Poisoned => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for KvError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Raw string store. Typed access goes through `load` and `save`.
pub trait KeyValueStore {
    /// Returns the stored text for `key`, or `None` when absent.
    fn read_raw(&self, key: &str) -> KvResult<Option<String>>;

    /// Overwrites the stored text for `key`.
    fn write_raw(&self, key: &str, value: &str) -> KvResult<()>;

    /// Decodes the value under `key`, falling back to `default`.
    ///
    /// Absent keys, backend failures and decode failures all return
    /// `default`; this never reports an error.
    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T
    where
        Self: Sized,
    {
        let raw = match self.read_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(err) => {
                warn!("event=kv_load module=store status=fallback key={key} reason=read_failed error={err}");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=kv_load module=store status=fallback key={key} reason=decode_failed line={} column={}",
                    err.line(),
                    err.column()
                );
                default
            }
        }
    }

    /// Encodes and writes `value` under `key`.
    ///
    /// Failures are logged and dropped; the previously stored value for
    /// `key` is left untouched.
    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T)
    where
        Self: Sized,
    {
        if let Err(err) = self.try_save(key, value) {
            warn!("event=kv_save module=store status=dropped key={key} error={err}");
        }
    }

    /// Encodes and writes `value`, reporting failures to the caller.
    fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> KvResult<()>
    where
        Self: Sized,
    {
        let encoded = serde_json::to_string(value)?;
        self.write_raw(key, &encoded)
    }
}

/// Key-value store on the `kv_entries` table.
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    conn: SharedConnection,
}

impl SqliteKeyValueStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn read_raw(&self, key: &str) -> KvResult<Option<String>> {
        let conn = db::lock(&self.conn)?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_raw(&self, key: &str, value: &str) -> KvResult<()> {
        let conn = db::lock(&self.conn)?;
        conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-process key-value store with an optional byte quota.
///
/// The quota counts key and value bytes across all entries, which is how
/// browser-style storage limits behave.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
    capacity_bytes: Option<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity_bytes(capacity_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            capacity_bytes: Some(capacity_bytes),
        }
    }

    /// Returns stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn read_raw(&self, key: &str) -> KvResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| KvError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write_raw(&self, key: &str, value: &str) -> KvResult<()> {
        let mut entries = self.entries.lock().map_err(|_| KvError::Poisoned)?;

        if let Some(capacity_bytes) = self.capacity_bytes {
            let others: usize = entries
                .iter()
                .filter(|(existing, _)| existing.as_str() != key)
                .map(|(existing, stored)| existing.len() + stored.len())
                .sum();
            let required_bytes = others + key.len() + value.len();
            if required_bytes > capacity_bytes {
                return Err(KvError::CapacityExceeded {
                    key: key.to_string(),
                    required_bytes,
                    capacity_bytes,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, KvError, MemoryKeyValueStore, SqliteKeyValueStore};
    use crate::db::{open_db_in_memory, share};

    #[test]
    fn load_on_empty_store_returns_default() {
        let store = MemoryKeyValueStore::new();
        assert!(!store.load("isLoggedIn", false));
        assert_eq!(
            store.load("people", vec!["ana".to_string()]),
            vec!["ana".to_string()]
        );
    }

    #[test]
    fn save_then_load_ignores_default() {
        let store = MemoryKeyValueStore::new();
        store.save("isDarkMode", &true);
        assert!(store.load("isDarkMode", false));
    }

    #[test]
    fn corrupt_value_falls_back_to_default() {
        let store = MemoryKeyValueStore::new();
        store.write_raw("projects", "{not json").unwrap();
        assert_eq!(store.load::<Vec<i64>>("projects", vec![7]), vec![7]);
    }

    #[test]
    fn wrong_shape_falls_back_to_default() {
        let store = MemoryKeyValueStore::new();
        store.save("isLoggedIn", "yes");
        assert!(!store.load("isLoggedIn", false));
    }

    #[test]
    fn capacity_failure_is_swallowed_and_keeps_previous_value() {
        let store = MemoryKeyValueStore::with_capacity_bytes(32);
        store.save("k", &"small");
        store.save("k", &"x".repeat(64));
        assert_eq!(store.load("k", String::new()), "small");
    }

    #[test]
    fn try_save_reports_capacity_failure() {
        let store = MemoryKeyValueStore::with_capacity_bytes(8);
        let err = store.try_save("key", &"0123456789").unwrap_err();
        assert!(matches!(err, KvError::CapacityExceeded { capacity_bytes: 8, .. }));
    }

    #[test]
    fn sqlite_store_overwrites_per_key() {
        let store = SqliteKeyValueStore::new(share(open_db_in_memory().unwrap()));
        store.save("events", &vec![1, 2]);
        store.save("events", &vec![3]);
        store.save("projects", &vec![9]);

        assert_eq!(store.load::<Vec<i32>>("events", Vec::new()), vec![3]);
        assert_eq!(store.load::<Vec<i32>>("projects", Vec::new()), vec![9]);
        assert_eq!(store.read_raw("missing").unwrap(), None);
    }
}

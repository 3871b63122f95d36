//! SQLite database backing both persistent stores.
//!
//! # Responsibility
//! - Open the one database file that holds `kv_entries` (key-value store)
//!   and `documents` (document repository).
//! - Hand that connection to both stores as a `SharedConnection`.
//! - Apply schema migrations before either store sees the connection.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - One `Connection` per session. The key-value store locks it from the
//!   caller's thread; the document repository locks it from a blocking
//!   worker. Neither holds the lock across an `.await`.
//! - A poisoned lock surfaces as `DbError::Poisoned`, never as a panic.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Session connection shared by the key-value store and the document
/// repository.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Wraps a migrated connection so both stores can use it.
pub fn share(conn: Connection) -> SharedConnection {
    Arc::new(Mutex::new(conn))
}

/// Takes exclusive access to the shared connection for one store call.
pub fn lock(conn: &SharedConnection) -> DbResult<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|_| DbError::Poisoned)
}

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build with unknown tables.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A store call panicked while holding the shared connection.
    Poisoned,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "state database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Poisoned => write!(f, "shared state database connection is poisoned"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Poisoned => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

//! SQLite persistence for accounts, sessions and analysis records.
//!
//! A single connection is shared behind a mutex; every write is one SQL
//! statement, so the store never holds a read-modify-write across calls.
//! Handlers reach it through `web::block` since rusqlite is synchronous.

mod analyses;
mod sessions;
mod users;

pub use analyses::HISTORY_LIMIT;
pub use users::{NewUser, RequestOutcome};

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("stored document is invalid: {0}")]
    Document(#[from] serde_json::Error),

    #[error("email already registered")]
    DuplicateEmail,

    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("database lock poisoned")]
    Poisoned,
}

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS users (
        id            TEXT PRIMARY KEY,
        name          TEXT NOT NULL,
        email         TEXT NOT NULL UNIQUE,
        password_hash TEXT,
        provider      TEXT NOT NULL DEFAULT 'credentials',
        image         TEXT,
        request_count INTEGER NOT NULL DEFAULT 0,
        last_request  TEXT NOT NULL,
        is_premium    INTEGER NOT NULL DEFAULT 0,
        created_at    TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS sessions (
        token      TEXT PRIMARY KEY,
        user_id    TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        expires_at INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS analyses (
        id            TEXT PRIMARY KEY,
        user_id       TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        analysis_type TEXT NOT NULL,
        document      TEXT NOT NULL,
        created_at    TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS analyses_by_user ON analyses(user_id, created_at);
";

#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

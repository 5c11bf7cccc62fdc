pub mod fallback;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod queries;

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use board_types::models::{Comment, User};
use rusqlite::Connection;
use tracing::{error, info};

pub use fallback::FallbackStore;
pub use memory::MemoryStore;

/// `BOARD_DB_PATH` value that skips SQLite entirely.
pub const MEMORY_LOCATION: &str = "memory";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Connection, lock or query failure. Never shown to HTTP callers;
    /// [`FallbackStore`] absorbs it.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("comment {0} not found")]
    NotFound(i64),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Sqlite => "sqlite",
            StoreKind::Memory => "memory",
        }
    }
}

/// Persistence for comments and the read-only user table.
///
/// Calls block; async callers should go through `spawn_blocking`.
pub trait CommentStore: Send + Sync {
    fn kind(&self) -> StoreKind;

    /// All comments, newest first.
    fn list_comments(&self) -> Result<Vec<Comment>, StoreError>;

    /// Assigns id and timestamp. Callers validate the fields.
    fn create_comment(&self, author: &str, body: &str) -> Result<Comment, StoreError>;

    fn delete_comment(&self, id: i64) -> Result<(), StoreError>;

    fn list_users(&self) -> Result<Vec<User>, StoreError>;
}

/// Relational store backed by a single SQLite connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("DB lock poisoned: {}", e)))?;
        Ok(f(&conn)?)
    }
}

/// Pick the store once at startup.
///
/// `memory` selects the in-memory store outright. Any other value is a
/// SQLite path; if it cannot be opened the board still comes up, serving
/// from memory.
pub fn open_store(location: &str) -> Arc<dyn CommentStore> {
    if location == MEMORY_LOCATION {
        info!("Using in-memory store");
        return Arc::new(MemoryStore::new());
    }

    match SqliteStore::open(Path::new(location)) {
        Ok(store) => Arc::new(FallbackStore::new(store)),
        Err(e) => {
            error!("Error opening database at {}: {:#}", location, e);
            error!("Falling back to in-memory store");
            Arc::new(MemoryStore::new())
        }
    }
}

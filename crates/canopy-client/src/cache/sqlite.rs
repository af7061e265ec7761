//! SQLite-based cache store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::store::CacheStore;
use crate::error::{CanopyError, Result};

/// Durable key-value store backed by a single SQLite database.
///
/// One `cache_entries` table, keys as written by the key builder. No TTL and
/// no eviction: freshness is entirely caller-managed through warmup and
/// clear. Thread-safe via an internal mutex on the connection.
pub struct SqliteStore {
    /// Database connection (wrapped for thread safety).
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CanopyError::io_with_path(e, parent))?;
        }

        let conn = Connection::open(db_path).map_err(|e| CanopyError::Store {
            message: format!("Failed to open cache database: {}", e),
            source: Some(e),
        })?;

        // Enable WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(|e| CanopyError::Store {
                message: format!("Failed to set pragmas: {}", e),
                source: Some(e),
            })?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;

        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                stored_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| CanopyError::Store {
            message: format!("Failed to initialize cache schema: {}", e),
            source: Some(e),
        })?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| CanopyError::store(format!("Failed to lock database: {}", e)))
    }
}

impl CacheStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT value FROM cache_entries WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| CanopyError::Store {
            message: format!("Failed to query cache entry: {}", e),
            source: Some(e),
        })
    }

    fn has(&self, key: &str) -> Result<bool> {
        let conn = self.lock()?;
        let exists: Option<bool> = conn
            .query_row(
                "SELECT 1 FROM cache_entries WHERE key = ?1 LIMIT 1",
                params![key],
                |_| Ok(true),
            )
            .optional()
            .map_err(|e| CanopyError::Store {
                message: format!("Failed to check cache entry: {}", e),
                source: Some(e),
            })?;
        Ok(exists.unwrap_or(false))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT OR REPLACE INTO cache_entries (key, value, stored_at) VALUES (?1, ?2, ?3)",
            params![key, value, now],
        )
        .map_err(|e| CanopyError::Store {
            message: format!("Failed to set cache entry: {}", e),
            source: Some(e),
        })?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let conn = self.lock()?;
        let deleted = conn
            .execute("DELETE FROM cache_entries WHERE key = ?1", params![key])
            .map_err(|e| CanopyError::Store {
                message: format!("Failed to delete cache entry: {}", e),
                source: Some(e),
            })?;
        Ok(deleted > 0)
    }

    fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM cache_entries", [])
            .map_err(|e| CanopyError::Store {
                message: format!("Failed to clear cache entries: {}", e),
                source: Some(e),
            })?;
        debug!("Cleared all cache entries");
        Ok(())
    }
}

//! SQLite implementation of the PayloadStore trait.
//!
//! This is the primary payload backend. It uses rusqlite with bundled
//! SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;
use rusqlite::{params, Connection, OptionalExtension};

use accord_core::{Namespace, RecordId};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::PayloadStore;

/// SQLite-based payload store.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqlitePayloadStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePayloadStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

fn lock_conn(conn: &Arc<Mutex<Connection>>) -> Result<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|e| {
        StoreError::Database(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
            Some(format!("mutex poisoned: {}", e)),
        ))
    })
}

fn join_error(e: tokio::task::JoinError) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
        Some(format!("spawn_blocking failed: {}", e)),
    ))
}

#[async_trait]
impl PayloadStore for SqlitePayloadStore {
    async fn put(&self, namespace: &Namespace, id: RecordId, blob: Bytes) -> Result<()> {
        let namespace = *namespace;
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = lock_conn(&conn)?;

            conn.execute(
                "INSERT INTO payloads (namespace, record_id, blob, stored_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(namespace, record_id) DO UPDATE SET
                    blob = excluded.blob,
                    stored_at = excluded.stored_at",
                params![
                    namespace.as_bytes().as_slice(),
                    id.value() as i64,
                    blob.as_ref(),
                    now_millis(),
                ],
            )?;

            Ok(())
        })
        .await
        .map_err(join_error)?
    }

    async fn get(&self, namespace: &Namespace, id: RecordId) -> Result<Option<Bytes>> {
        let namespace = *namespace;
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = lock_conn(&conn)?;

            let blob: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT blob FROM payloads WHERE namespace = ?1 AND record_id = ?2",
                    params![namespace.as_bytes().as_slice(), id.value() as i64],
                    |row| row.get(0),
                )
                .optional()?;

            Ok(blob.map(Bytes::from))
        })
        .await
        .map_err(join_error)?
    }

    async fn contains(&self, namespace: &Namespace, id: RecordId) -> Result<bool> {
        let namespace = *namespace;
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = lock_conn(&conn)?;

            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM payloads WHERE namespace = ?1 AND record_id = ?2)",
                params![namespace.as_bytes().as_slice(), id.value() as i64],
                |row| row.get(0),
            )?;

            Ok(exists)
        })
        .await
        .map_err(join_error)?
    }

    async fn remove(&self, namespace: &Namespace, id: RecordId) -> Result<()> {
        let namespace = *namespace;
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = lock_conn(&conn)?;

            conn.execute(
                "DELETE FROM payloads WHERE namespace = ?1 AND record_id = ?2",
                params![namespace.as_bytes().as_slice(), id.value() as i64],
            )?;

            Ok(())
        })
        .await
        .map_err(join_error)?
    }

    async fn count(&self, namespace: &Namespace) -> Result<u64> {
        let namespace = *namespace;
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = lock_conn(&conn)?;

            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM payloads WHERE namespace = ?1",
                params![namespace.as_bytes().as_slice()],
                |row| row.get(0),
            )?;

            Ok(count as u64)
        })
        .await
        .map_err(join_error)?
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}

//! SQLite-based cache storage with file blob support
//!
//! Stores small payloads inline in SQLite, large payloads (>10KB) as files.
//! Entries carry their write timestamp; freshness is decided by the reader.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::key::normalize_key;
use crate::error::CacheError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 2;

/// Payloads larger than this are stored as external blobs
const INLINE_THRESHOLD: usize = 10 * 1024; // 10KB

const DB_FILE: &str = "cache.db";
const BLOBS_DIR: &str = "blobs";

type Result<T> = std::result::Result<T, CacheError>;

/// SQLite-backed cache storage with file blob support
pub struct CacheStorage {
    conn: Connection,
    blobs_dir: PathBuf,
}

impl CacheStorage {
    /// Get the default cache directory path (~/.cache/rpalert on Linux)
    pub fn default_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("rpalert"))
    }

    /// Open or create cache storage in a directory
    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join(DB_FILE);
        let blobs_dir = cache_dir.join(BLOBS_DIR);
        std::fs::create_dir_all(&blobs_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create blobs dir: {}", e)))?;

        let conn = Connection::open(&db_path)?;

        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            Self::nuke(&db_path, &blobs_dir)?;
            return Self::open_at(cache_dir);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                cache_key TEXT PRIMARY KEY NOT NULL,
                data BLOB,
                blob_path TEXT,
                created_at INTEGER NOT NULL,
                size_bytes INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_created_at ON cache_entries(created_at);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn, blobs_dir })
    }

    /// Destroy every entry stored under `cache_dir`.
    ///
    /// Returns whether anything was removed. A directory that holds no cache is
    /// not an error.
    pub fn reset_at(cache_dir: &Path) -> Result<bool> {
        let db_path = cache_dir.join(DB_FILE);
        let blobs_dir = cache_dir.join(BLOBS_DIR);
        let existed = db_path.exists() || blobs_dir.exists();
        Self::nuke(&db_path, &blobs_dir)?;
        Ok(existed)
    }

    /// Get a payload written less than `max_age` ago.
    ///
    /// Missing and stale entries both come back as `None`.
    pub fn get(&self, key: &str, max_age: Duration) -> Result<Option<Vec<u8>>> {
        let key = normalize_key(key);
        let now = Utc::now().timestamp();

        let row: Option<(Option<Vec<u8>>, Option<String>, i64)> = self
            .conn
            .query_row(
                "SELECT data, blob_path, created_at FROM cache_entries WHERE cache_key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let Some((data, blob_path, created_at)) = row else {
            return Ok(None);
        };

        let age = now.saturating_sub(created_at);
        if age < 0 || age as u64 >= max_age.as_secs() {
            log::debug!("Cache entry {} is stale ({}s old)", key, age);
            return Ok(None);
        }

        match (data, blob_path) {
            (Some(data), None) => Ok(Some(data)),
            (None, Some(blob_path)) => {
                let full_path = self.blobs_dir.join(&blob_path);
                match std::fs::read(&full_path) {
                    Ok(data) => Ok(Some(data)),
                    Err(e) => {
                        log::warn!("Failed to read blob {}: {}", blob_path, e);
                        let _ = self
                            .conn
                            .execute("DELETE FROM cache_entries WHERE cache_key = ?1", [&key]);
                        Ok(None)
                    }
                }
            }
            _ => Ok(None),
        }
    }

    /// Store a payload stamped with the current time, replacing any prior entry
    pub fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        self.put_with_timestamp(key, data, Utc::now().timestamp())
    }

    /// Deserialize a fresh JSON payload
    pub fn get_json<T: DeserializeOwned>(&self, key: &str, max_age: Duration) -> Result<Option<T>> {
        match self.get(key, max_age)? {
            Some(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    log::warn!("Discarding undecodable cache entry: {}", e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Serialize and store a JSON payload
    pub fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| CacheError::Io(format!("Failed to serialize payload: {}", e)))?;
        self.put(key, &bytes)
    }

    fn put_with_timestamp(&self, key: &str, data: &[u8], created_at: i64) -> Result<()> {
        let key = normalize_key(key);

        if data.len() <= INLINE_THRESHOLD {
            self.conn.execute(
                "INSERT OR REPLACE INTO cache_entries
                 (cache_key, data, blob_path, created_at, size_bytes)
                 VALUES (?1, ?2, NULL, ?3, ?4)",
                params![key, data, created_at, data.len()],
            )?;
        } else {
            let blob_path = self.write_blob(&key, data)?;
            self.conn.execute(
                "INSERT OR REPLACE INTO cache_entries
                 (cache_key, data, blob_path, created_at, size_bytes)
                 VALUES (?1, NULL, ?2, ?3, ?4)",
                params![key, blob_path, created_at, data.len()],
            )?;
        }
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let (total_entries, total_size, oldest, newest): (i64, i64, Option<i64>, Option<i64>) =
            self.conn.query_row(
                "SELECT COUNT(*), COALESCE(SUM(size_bytes), 0), MIN(created_at), MAX(created_at)
                 FROM cache_entries",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )?;

        Ok(CacheStats {
            total_entries: total_entries as usize,
            total_size_bytes: total_size as usize,
            oldest_entry: oldest,
            newest_entry: newest,
        })
    }

    /// Write a blob file, sharded by first 2 chars of key
    fn write_blob(&self, key: &str, data: &[u8]) -> Result<String> {
        let shard = &key[..2.min(key.len())];
        let shard_dir = self.blobs_dir.join(shard);
        std::fs::create_dir_all(&shard_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create shard dir: {}", e)))?;

        let filename = format!("{}.json", key);
        let rel_path = format!("{}/{}", shard, filename);
        let full_path = shard_dir.join(&filename);

        std::fs::write(&full_path, data)
            .map_err(|e| CacheError::Io(format!("Failed to write blob: {}", e)))?;

        Ok(rel_path)
    }

    /// Delete the database and all blobs
    fn nuke(db_path: &Path, blobs_dir: &Path) -> Result<()> {
        if db_path.exists() {
            std::fs::remove_file(db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache DB: {}", e)))?;
        }
        if blobs_dir.exists() {
            std::fs::remove_dir_all(blobs_dir)
                .map_err(|e| CacheError::Io(format!("Failed to remove blobs dir: {}", e)))?;
        }
        Ok(())
    }
}

/// Statistics about cache state
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_size_bytes: usize,
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
}

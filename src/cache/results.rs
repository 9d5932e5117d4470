//! Best-effort result cache used by the CLI
//!
//! Wraps [`CacheStorage`] so that every storage failure is logged and treated
//! as a miss. A disabled cache behaves as an always-empty store.

use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use std::time::Duration;

use crate::cache::CacheStorage;

/// Best-effort cache of serialized results
pub struct ResultCache {
    storage: Option<CacheStorage>,
    max_age: Duration,
}

impl ResultCache {
    /// Open the cache in `dir`; failures leave the cache disabled
    pub fn open(dir: &Path, max_age: Duration) -> Self {
        let storage = match CacheStorage::open_at(dir) {
            Ok(storage) => Some(storage),
            Err(e) => {
                log::warn!("Cache unavailable at {}: {}", dir.display(), e);
                None
            }
        };
        Self { storage, max_age }
    }

    /// A cache that never hits and never stores
    pub fn disabled() -> Self {
        Self {
            storage: None,
            max_age: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.storage.is_some()
    }

    /// Fetch a fresh entry
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let storage = self.storage.as_ref()?;
        match storage.get_json(key, self.max_age) {
            Ok(hit) => hit,
            Err(e) => {
                log::warn!("Cache read failed, treating as miss: {}", e);
                None
            }
        }
    }

    /// Store an entry, logging failures
    pub fn store<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Some(ref storage) = self.storage
            && let Err(e) = storage.put_json(key, value)
        {
            log::warn!("Cache write failed: {}", e);
        }
    }
}

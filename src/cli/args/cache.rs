//! Cache control arguments

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::cache::{CacheStorage, max_age_from_hours};
use crate::error::Result;

#[derive(Args, Debug, Clone)]
pub struct CacheArgs {
    /// Delete all cached results before running
    #[arg(long)]
    pub reset_cache: bool,

    /// Bypass the cache, fetch fresh data from the API
    #[arg(long, env = "RPALERT_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Hours before a cached result expires
    #[arg(long, default_value_t = 24.0, env = "RPALERT_CACHE_HOURS", hide_env = true)]
    pub cache_hours: f64,

    /// Cache directory (defaults to the user cache dir)
    #[arg(long, env = "RPALERT_CACHE_DIR", hide_env = true)]
    pub cache_dir: Option<PathBuf>,

    /// Show cache statistics and exit
    #[arg(long)]
    pub cache_info: bool,
}

impl CacheArgs {
    /// Directory holding the cache database
    pub fn resolve_dir(&self) -> Result<PathBuf> {
        match self.cache_dir {
            Some(ref dir) => Ok(dir.clone()),
            None => Ok(CacheStorage::default_dir()?),
        }
    }

    pub fn max_age(&self) -> Duration {
        max_age_from_hours(self.cache_hours)
    }
}

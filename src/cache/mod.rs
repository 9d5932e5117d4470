//! Local cache for report results
//!
//! Provides SQLite-backed caching with file blob storage for large payloads.
//! One entry per distinct invocation, so repeated queries skip the API.

pub mod key;
pub mod results;
pub mod storage;

use std::time::Duration;

/// Convert a `--cache-hours` value to a freshness window.
///
/// Non-positive values disable freshness; values too large for a `Duration`
/// saturate to `Duration::MAX`.
pub fn max_age_from_hours(hours: f64) -> Duration {
    if hours.is_nan() || hours <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(hours * 60.0 * 60.0).unwrap_or(Duration::MAX)
}

// Re-export main types
pub use key::cache_key;
pub use results::ResultCache;
pub use storage::CacheStorage;

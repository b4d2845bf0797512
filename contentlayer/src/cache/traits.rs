//! Shared types for the cache-aside store.
//!
//! - [`BoxFuture`]: boxed future used for dyn-compatible async methods and
//!   for the single shared load future behind each in-flight entry
//! - [`CacheStats`]: point-in-time copy of the store's counters

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a resolved entry.
    pub hits: u64,
    /// Lookups that started a new load.
    pub misses: u64,
    /// Lookups that attached to a load already in flight.
    pub coalesced: u64,
    /// Loads that failed and were discarded.
    pub failures: u64,
    /// Entries currently held (resolved and in flight).
    pub entries: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    ///
    /// Coalesced lookups count as hits: they did not cause a fetch.
    pub fn hit_rate(&self) -> f64 {
        let served = self.hits + self.coalesced;
        let total = served + self.misses;
        if total == 0 {
            0.0
        } else {
            served as f64 / total as f64
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cache: {} hits, {} misses, {} coalesced, {} failures, {} entries ({:.1}% hit rate)",
            self.hits,
            self.misses,
            self.coalesced,
            self.failures,
            self.entries,
            self.hit_rate() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_default() {
        let stats = CacheStats::default();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.entries, 0);
        assert!((stats.hit_rate() - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_cache_stats_hit_rate_counts_coalesced() {
        let stats = CacheStats {
            hits: 6,
            misses: 2,
            coalesced: 2,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_cache_stats_display() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            coalesced: 0,
            failures: 1,
            entries: 1,
        };
        let display = stats.to_string();
        assert!(display.contains("3 hits"));
        assert!(display.contains("1 misses"));
        assert!(display.contains("1 failures"));
        assert!(display.contains("75.0% hit rate"));
    }
}

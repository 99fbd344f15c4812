//! Opt-in cache of classifier outputs.
//!
//! The classifier is a pure function of the encoded feature vector, and the
//! input space is tiny (4 × 3 × 3 profiles for the standard layout), so
//! caching probabilities per feature vector removes nearly every model call
//! in a long-running session. Resolution itself is never cached because
//! substitution draws from the RNG.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use crate::classifier::FeatureVector;
use crate::telemetry;

/// Configuration for the prediction cache.
///
/// ```rust
/// # use dietplan::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(256)
///     .ttl(Duration::from_secs(600));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 1,024.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 1 hour.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1024,
            ttl: Duration::from_secs(3600),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// In-memory LRU + TTL cache of class probabilities by feature vector.
pub struct PredictionCache {
    cache: Cache<FeatureVector, Arc<Vec<f32>>>,
}

impl PredictionCache {
    /// Create a new prediction cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    /// Look up cached probabilities.
    ///
    /// Returns `None` on cache miss. Emits cache hit/miss metrics.
    pub fn get(&self, features: &FeatureVector) -> Option<Arc<Vec<f32>>> {
        match self.cache.get(features) {
            Some(probs) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                Some(probs)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    /// Insert probabilities for a feature vector.
    pub fn insert(&self, features: FeatureVector, probabilities: Arc<Vec<f32>>) {
        self.cache.insert(features, probabilities);
    }

    /// Number of entries (approximate until pending tasks run).
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_then_hit() {
        let cache = PredictionCache::new(&CacheConfig::default());
        let key = FeatureVector(vec![0, 1, 2]);
        assert!(cache.get(&key).is_none());

        cache.insert(key.clone(), Arc::new(vec![0.2, 0.8]));
        assert_eq!(cache.get(&key).as_deref(), Some(&vec![0.2, 0.8]));
        assert!(cache.get(&FeatureVector(vec![0, 1, 0])).is_none());
    }

    #[test]
    fn entry_count_tracks_inserts() {
        let cache = PredictionCache::new(&CacheConfig::new().max_entries(16));
        cache.insert(FeatureVector(vec![0]), Arc::new(vec![1.0]));
        cache.insert(FeatureVector(vec![1]), Arc::new(vec![1.0]));
        assert_eq!(cache.entry_count(), 2);
    }
}

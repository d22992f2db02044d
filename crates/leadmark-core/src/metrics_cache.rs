//! Memoised run widths
//!
//! Body text repeats itself: the same emphasized prefixes and common words
//! come back on every page. Wrapping a [`GlyphMetrics`] backend in
//! [`CachedMetrics`] answers those repeats from an LRU instead of asking the
//! backend again.
//!
//! The key holds the exact font size bits, so changing the size between
//! documents can never hand back a width measured at the old size.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use crate::{error::MetricsError, traits::GlyphMetrics, types::GlyphStyle};

/// Default number of remembered widths
const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(4096) {
    Some(v) => v,
    None => unreachable!(),
};

/// Uniquely identifies one width measurement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricsCacheKey {
    pub text: String,
    pub style: GlyphStyle,
    /// `f32::to_bits` of the font size
    pub size_bits: u32,
}

impl MetricsCacheKey {
    pub fn new(text: impl Into<String>, style: GlyphStyle, font_size: f32) -> Self {
        Self {
            text: text.into(),
            style,
            size_bits: font_size.to_bits(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub hit_rate: f64,
}

/// LRU of measured widths
pub struct MetricsCache {
    entries: Mutex<LruCache<MetricsCacheKey, f32>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY.get())
    }

    /// A zero capacity falls back to the default
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &MetricsCacheKey) -> Option<f32> {
        let hit = self.entries.lock().get(key).copied();
        let counter = if hit.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        hit
    }

    pub fn insert(&self, key: MetricsCacheKey, width: f32) {
        self.entries.lock().put(key, width);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every width and reset the counters
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStats {
            hits,
            misses,
            entries: self.len(),
            hit_rate: if total > 0 {
                hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe metrics cache handle
pub type SharedMetricsCache = Arc<MetricsCache>;

/// Backend wrapper that answers repeated measurements from a cache
///
/// Failures are never cached; the next request for the same run asks the
/// backend again.
pub struct CachedMetrics {
    inner: Arc<dyn GlyphMetrics>,
    cache: SharedMetricsCache,
}

impl CachedMetrics {
    pub fn new(inner: Arc<dyn GlyphMetrics>, cache: SharedMetricsCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &SharedMetricsCache {
        &self.cache
    }
}

impl GlyphMetrics for CachedMetrics {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn measure_width(
        &self,
        text: &str,
        style: GlyphStyle,
        font_size: f32,
    ) -> Result<f32, MetricsError> {
        let key = MetricsCacheKey::new(text, style, font_size);
        if let Some(width) = self.cache.get(&key) {
            return Ok(width);
        }

        let width = self.inner.measure_width(text, style, font_size)?;
        self.cache.insert(key, width);
        Ok(width)
    }

    fn clear_cache(&self) {
        self.cache.clear();
        self.inner.clear_cache();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct CountingMetrics {
        calls: AtomicUsize,
    }

    impl GlyphMetrics for CountingMetrics {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn measure_width(
            &self,
            text: &str,
            _style: GlyphStyle,
            font_size: f32,
        ) -> Result<f32, MetricsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.is_empty() {
                return Err(MetricsError::Backend("empty run".into()));
            }
            Ok(text.len() as f32 * font_size)
        }
    }

    fn counting() -> Arc<CountingMetrics> {
        Arc::new(CountingMetrics {
            calls: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_key_separates_style_and_size() {
        let base = MetricsCacheKey::new("he", GlyphStyle::Regular, 12.0);
        assert_ne!(base, MetricsCacheKey::new("he", GlyphStyle::Emphasized, 12.0));
        assert_ne!(base, MetricsCacheKey::new("he", GlyphStyle::Regular, 12.5));
        assert_eq!(base, MetricsCacheKey::new("he", GlyphStyle::Regular, 12.0));
    }

    #[test]
    fn test_repeat_hits_cache() {
        let inner = counting();
        let cached = CachedMetrics::new(inner.clone(), Arc::new(MetricsCache::new()));

        assert_eq!(cached.measure_width("abc", GlyphStyle::Regular, 10.0), Ok(30.0));
        assert_eq!(cached.measure_width("abc", GlyphStyle::Regular, 10.0), Ok(30.0));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);

        let stats = cached.cache().stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hit_rate, 0.5);
    }

    #[test]
    fn test_size_change_is_not_stale() {
        let inner = counting();
        let cached = CachedMetrics::new(inner.clone(), Arc::new(MetricsCache::new()));

        assert_eq!(cached.measure_width("abc", GlyphStyle::Regular, 10.0), Ok(30.0));
        assert_eq!(cached.measure_width("abc", GlyphStyle::Regular, 12.0), Ok(36.0));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failures_not_cached() {
        let inner = counting();
        let cached = CachedMetrics::new(inner.clone(), Arc::new(MetricsCache::new()));

        assert!(cached.measure_width("", GlyphStyle::Regular, 10.0).is_err());
        assert!(cached.measure_width("", GlyphStyle::Regular, 10.0).is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert!(cached.cache().is_empty());
    }

    #[test]
    fn test_lru_eviction() {
        let cache = MetricsCache::with_capacity(2);
        cache.insert(MetricsCacheKey::new("a", GlyphStyle::Regular, 1.0), 1.0);
        cache.insert(MetricsCacheKey::new("b", GlyphStyle::Regular, 1.0), 2.0);
        cache.insert(MetricsCacheKey::new("c", GlyphStyle::Regular, 1.0), 3.0);

        assert_eq!(cache.len(), 2);
        assert!(cache
            .get(&MetricsCacheKey::new("a", GlyphStyle::Regular, 1.0))
            .is_none());
    }

    #[test]
    fn test_clear_resets() {
        let cache = MetricsCache::new();
        cache.insert(MetricsCacheKey::new("a", GlyphStyle::Regular, 1.0), 1.0);
        cache.get(&MetricsCacheKey::new("a", GlyphStyle::Regular, 1.0));
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 0);
    }
}

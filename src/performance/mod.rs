//! Result caching and event debouncing
//!
//! Diffs are recomputed from scratch for every input change. The cache here
//! only avoids redoing that work when a view redraws with the same inputs.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::diff::{DiffMode, DiffOutput};

/// Content-derived key for a diff result.
///
/// Holds the normalized texts themselves so that equality is structural; the
/// hash only speeds up lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct DiffCacheKey {
    pub content_hash: u64,
    pub left: String,
    pub right: String,
    pub mode: DiffMode,
}

impl DiffCacheKey {
    pub fn new(left: String, right: String, mode: DiffMode) -> Self {
        let content_hash = calculate_content_hash(&left, &right, mode);
        Self { content_hash, left, right, mode }
    }
}

/// Calculate a simple hash of the inputs for the cache key
fn calculate_content_hash(left: &str, right: &str, mode: DiffMode) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    left.hash(&mut hasher);
    right.hash(&mut hasher);
    mode.hash(&mut hasher);
    hasher.finish()
}

/// Cache of recent diff results, one entry by default
pub struct DiffCache {
    cache: LruCache<DiffCacheKey, Arc<DiffOutput>>,
    hits: u64,
    misses: u64,
}

impl DiffCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Get a cached result or compute and store it.
    pub fn get_or_compute<F>(&mut self, key: DiffCacheKey, compute: F) -> Arc<DiffOutput>
    where
        F: FnOnce(&DiffCacheKey) -> DiffOutput,
    {
        if let Some(output) = self.cache.get(&key) {
            self.hits += 1;
            return Arc::clone(output);
        }

        self.misses += 1;
        let output = Arc::new(compute(&key));
        self.cache.put(key, Arc::clone(&output));
        output
    }

    /// Get cache statistics
    pub fn stats(&self) -> DiffCacheStats {
        DiffCacheStats {
            entries: self.cache.len(),
            capacity: self.cache.cap().get(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl Default for DiffCache {
    fn default() -> Self {
        Self::new(NonZeroUsize::MIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffCacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Collapses bursts of change notifications per path.
///
/// A path becomes ready once no new notification has arrived for it during
/// the debounce window.
pub struct EventDebouncer {
    pending: HashMap<PathBuf, Instant>,
    debounce_duration: Duration,
}

impl EventDebouncer {
    pub fn new(debounce_duration: Duration) -> Self {
        Self {
            pending: HashMap::new(),
            debounce_duration,
        }
    }

    /// Record a notification for a path
    pub fn add_event(&mut self, path: PathBuf) {
        self.add_event_at(path, Instant::now());
    }

    pub fn add_event_at(&mut self, path: PathBuf, at: Instant) {
        self.pending.insert(path, at);
    }

    /// Take the paths whose debounce period has elapsed
    pub fn get_ready_events(&mut self) -> Vec<PathBuf> {
        self.get_ready_events_at(Instant::now())
    }

    pub fn get_ready_events_at(&mut self, now: Instant) -> Vec<PathBuf> {
        let ready: Vec<PathBuf> = self
            .pending
            .iter()
            .filter(|(_, last)| now.saturating_duration_since(**last) >= self.debounce_duration)
            .map(|(path, _)| path.clone())
            .collect();

        for path in &ready {
            self.pending.remove(path);
        }
        ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffGenerator;

    fn compute(key: &DiffCacheKey) -> DiffOutput {
        DiffGenerator::default().generate(&key.left, &key.right, key.mode)
    }

    #[test]
    fn test_cache_hit_on_same_inputs() {
        let mut cache = DiffCache::default();
        let key = DiffCacheKey::new("a\n".into(), "b\n".into(), DiffMode::Line);

        let first = cache.get_or_compute(key.clone(), compute);
        let second = cache.get_or_compute(key, |_| panic!("should be cached"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_single_entry_is_replaced() {
        let mut cache = DiffCache::default();
        let line = DiffCacheKey::new("a".into(), "b".into(), DiffMode::Line);
        let word = DiffCacheKey::new("a".into(), "b".into(), DiffMode::Word);

        cache.get_or_compute(line.clone(), compute);
        let output = cache.get_or_compute(word, compute);
        assert_eq!(output.mode, DiffMode::Word);
        assert_eq!(cache.stats().entries, 1);

        cache.get_or_compute(line, compute);
        assert_eq!(cache.stats().misses, 3);
    }

    #[test]
    fn test_key_equality_is_structural() {
        let a = DiffCacheKey::new("x".into(), "y".into(), DiffMode::Line);
        let b = DiffCacheKey::new("x".into(), "y".into(), DiffMode::Line);
        let c = DiffCacheKey::new("xy".into(), "".into(), DiffMode::Line);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_debouncer_waits_for_quiet_period() {
        let mut debouncer = EventDebouncer::new(Duration::from_millis(100));
        let start = Instant::now();
        let path = PathBuf::from("left.txt");

        debouncer.add_event_at(path.clone(), start);
        debouncer.add_event_at(path.clone(), start + Duration::from_millis(80));
        assert!(debouncer.get_ready_events_at(start + Duration::from_millis(120)).is_empty());

        let ready = debouncer.get_ready_events_at(start + Duration::from_millis(200));
        assert_eq!(ready, vec![path]);
        assert!(debouncer.get_ready_events_at(start + Duration::from_millis(400)).is_empty());
    }
}

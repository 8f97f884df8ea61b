//! Cached diff computation for a live comparison
//!
//! A session owns the line engine and a small result cache keyed by the
//! normalized inputs and the highlight mode. Each call is independent;
//! dropping the cache never changes the result.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::diff::{normalize_newlines, DiffAlgorithmType, DiffGenerator, DiffMode, DiffOutput};
use crate::performance::{DiffCache, DiffCacheKey, DiffCacheStats};

pub struct DiffSession {
    generator: DiffGenerator,
    algorithm: DiffAlgorithmType,
    cache: DiffCache,
}

impl DiffSession {
    pub fn new(algorithm: DiffAlgorithmType, cache_size: NonZeroUsize) -> Self {
        Self {
            generator: DiffGenerator::new(algorithm),
            algorithm,
            cache: DiffCache::new(cache_size),
        }
    }

    /// Diff two texts, reusing the last result when nothing changed.
    pub fn compute(&mut self, left: &str, right: &str, mode: DiffMode) -> Arc<DiffOutput> {
        let key = DiffCacheKey::new(normalize_newlines(left), normalize_newlines(right), mode);
        let generator = &self.generator;

        self.cache
            .get_or_compute(key, |key| generator.generate(&key.left, &key.right, key.mode))
    }

    pub fn algorithm(&self) -> DiffAlgorithmType {
        self.algorithm
    }

    /// Name and one-line description of the line engine in use
    pub fn algorithm_summary(&self) -> (&str, &str) {
        (self.generator.algorithm_name(), self.generator.algorithm_description())
    }

    pub fn cache_stats(&self) -> DiffCacheStats {
        self.cache.stats()
    }
}

impl Default for DiffSession {
    fn default() -> Self {
        Self::new(DiffAlgorithmType::default(), NonZeroUsize::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_and_lf_share_a_cache_entry() {
        let mut session = DiffSession::default();

        let first = session.compute("a\r\nb", "a\nc", DiffMode::Line);
        let second = session.compute("a\nb", "a\r\nc", DiffMode::Line);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(session.cache_stats().hits, 1);
    }

    #[test]
    fn test_algorithm_summary() {
        let session = DiffSession::new(DiffAlgorithmType::Lcs, NonZeroUsize::MIN);

        assert_eq!(session.algorithm(), DiffAlgorithmType::Lcs);
        let (name, description) = session.algorithm_summary();
        assert_eq!(name, "LCS");
        assert!(!description.is_empty());
    }

    #[test]
    fn test_mode_change_recomputes() {
        let mut session = DiffSession::default();

        let line = session.compute("a b", "a c", DiffMode::Line);
        let word = session.compute("a b", "a c", DiffMode::Word);

        assert_eq!(line.rows, word.rows);
        assert_ne!(line.highlights, word.highlights);
        assert_eq!(session.cache_stats().misses, 2);
    }
}

//! Memoization of similarity indexes.
//!
//! Two levels are cached. Signal matrices are keyed by
//! `(dataset version, signal)`, so changing only the weights reuses every
//! matrix already computed. Combined indexes are keyed by
//! `(dataset version, weight bits)`.
//!
//! A version is a checksum and can collide, so every hit is confirmed
//! against the dataset the entry was built from. A mismatching entry is
//! rebuilt and replaced.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ahash::AHashMap;
use parking_lot::Mutex;

use crate::combine::{Signal, SignalWeights};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::index::{SimilarityIndex, signal_matrix};
use crate::similarity::matrix::SimilarityMatrix;
use crate::vectorize::tfidf::TfidfConfig;

type SignalKey = (u64, Signal);
type IndexKey = (u64, [u64; 3]);
type SignalEntry = (Arc<Dataset>, Arc<SimilarityMatrix>);

/// Thread-safe cache of signal matrices and combined indexes.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use wisata::combine::SignalWeights;
/// use wisata::dataset::Dataset;
/// use wisata::index::cache::IndexCache;
/// use wisata::place::Place;
///
/// let dataset = Arc::new(
///     Dataset::new(vec![
///         Place::new("a", "A", "Budaya", "old temple", 10000, 4.5),
///         Place::new("b", "B", "Bahari", "quiet beach", 20000, 4.1),
///     ])
///     .unwrap(),
/// );
///
/// let cache = IndexCache::new();
/// let first = cache.get_or_build(&dataset, SignalWeights::default()).unwrap();
/// let second = cache.get_or_build(&dataset, SignalWeights::default()).unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(cache.stats().hits, 1);
/// ```
#[derive(Debug)]
pub struct IndexCache {
    config: TfidfConfig,
    signals: Mutex<AHashMap<SignalKey, SignalEntry>>,
    indexes: Mutex<AHashMap<IndexKey, Arc<SimilarityIndex>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered with a cached index.
    pub hits: usize,
    /// Requests that built a new index.
    pub misses: usize,
    /// Cached signal matrices.
    pub signal_matrices: usize,
    /// Cached combined indexes.
    pub indexes: usize,
}

impl Default for IndexCache {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexCache {
    /// Create an empty cache with the default vectorizer settings.
    pub fn new() -> Self {
        Self::with_config(TfidfConfig::default())
    }

    /// Create an empty cache whose description matrices use `config`.
    pub fn with_config(config: TfidfConfig) -> Self {
        IndexCache {
            config,
            signals: Mutex::new(AHashMap::new()),
            indexes: Mutex::new(AHashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Vectorizer settings used for description matrices.
    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }

    /// Return the index for `(dataset, weights)`, building it on first use.
    pub fn get_or_build(
        &self,
        dataset: &Arc<Dataset>,
        weights: SignalWeights,
    ) -> Result<Arc<SimilarityIndex>> {
        weights.validate()?;

        let key = (dataset.version(), weights.cache_key());
        if let Some(index) = self.indexes.lock().get(&key)
            && index.dataset().same_content(dataset)
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("index cache hit for dataset {:#x}", key.0);
            return Ok(Arc::clone(index));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        log::debug!("index cache miss for dataset {:#x}", key.0);

        let mut signals = AHashMap::new();
        for signal in weights.active_signals() {
            signals.insert(signal, self.signal(dataset, signal)?);
        }

        let index = Arc::new(SimilarityIndex::from_signals(
            Arc::clone(dataset),
            weights,
            signals,
        )?);

        let mut indexes = self.indexes.lock();
        // A concurrent builder may have finished first; keep its entry.
        if let Some(existing) = indexes
            .get(&key)
            .filter(|existing| existing.dataset().same_content(dataset))
        {
            return Ok(Arc::clone(existing));
        }
        if indexes.insert(key, Arc::clone(&index)).is_some() {
            log::warn!("dataset version {:#x} collides; replaced cached index", key.0);
        }
        Ok(index)
    }

    fn signal(&self, dataset: &Arc<Dataset>, signal: Signal) -> Result<Arc<SimilarityMatrix>> {
        let key = (dataset.version(), signal);
        if let Some((owner, matrix)) = self.signals.lock().get(&key)
            && owner.same_content(dataset)
        {
            log::debug!("reusing cached {signal} matrix");
            return Ok(Arc::clone(matrix));
        }

        // Built outside the lock; matrix construction is the expensive part.
        let matrix = Arc::new(signal_matrix(dataset, signal, &self.config)?);
        let mut signals = self.signals.lock();
        if let Some((owner, existing)) = signals.get(&key)
            && owner.same_content(dataset)
        {
            return Ok(Arc::clone(existing));
        }
        signals.insert(key, (Arc::clone(dataset), Arc::clone(&matrix)));
        Ok(matrix)
    }

    /// Number of cached combined indexes.
    pub fn len(&self) -> usize {
        self.indexes.lock().len()
    }

    /// True when no index is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached matrix and index.
    pub fn clear(&self) {
        self.signals.lock().clear();
        self.indexes.lock().clear();
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            signal_matrices: self.signals.lock().len(),
            indexes: self.len(),
        }
    }
}

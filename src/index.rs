//! Similarity index: the per-signal matrices and their weighted combination
//! for one dataset and one set of weights.
//!
//! Building an index runs the whole pipeline:
//!
//! ```text
//! descriptions -> TF-IDF -> cosine ----\
//! prices  -> normalize_by_max -> cosine --> weighted sum -> combined matrix
//! ratings -> normalize_by_max -> cosine --/
//! ```
//!
//! Only signals with a positive weight are computed. The index is immutable
//! once built; [`cache::IndexCache`] memoizes indexes across calls.

pub mod cache;

use std::sync::Arc;

use ahash::AHashMap;

use crate::combine::{Signal, SignalWeights, combine};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::normalize::normalize_by_max;
use crate::similarity::cosine::{column_similarity_matrix, cosine_similarity_matrix};
use crate::similarity::matrix::SimilarityMatrix;
use crate::vectorize::tfidf::{TfidfConfig, TfidfVectorizer};

/// Precomputed similarities over a dataset.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    dataset: Arc<Dataset>,
    weights: SignalWeights,
    signals: AHashMap<Signal, Arc<SimilarityMatrix>>,
    combined: SimilarityMatrix,
}

impl SimilarityIndex {
    /// Assemble an index from already computed signal matrices.
    ///
    /// `signals` must contain a matrix for every active signal of `weights`.
    pub(crate) fn from_signals(
        dataset: Arc<Dataset>,
        weights: SignalWeights,
        signals: AHashMap<Signal, Arc<SimilarityMatrix>>,
    ) -> Result<Self> {
        let combined = combine(dataset.len(), &weights, |signal| {
            signals.get(&signal).map(Arc::as_ref)
        })?;

        Ok(SimilarityIndex {
            dataset,
            weights,
            signals,
            combined,
        })
    }

    /// Dataset the index was built from.
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Weights of the combination.
    pub fn weights(&self) -> &SignalWeights {
        &self.weights
    }

    /// Combined similarity matrix.
    pub fn combined(&self) -> &SimilarityMatrix {
        &self.combined
    }

    /// Matrix of `signal`, if that signal was active.
    pub fn signal(&self, signal: Signal) -> Option<&SimilarityMatrix> {
        self.signals.get(&signal).map(Arc::as_ref)
    }

    /// Combined similarity of two rows.
    pub fn score(&self, i: usize, j: usize) -> f64 {
        self.combined.get(i, j)
    }
}

/// Build an index with the default vectorizer settings.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use wisata::combine::SignalWeights;
/// use wisata::dataset::Dataset;
/// use wisata::index::build_index;
/// use wisata::place::Place;
///
/// let dataset = Arc::new(
///     Dataset::new(vec![
///         Place::new("a", "Candi A", "Budaya", "ancient temple stone", 10000, 4.5),
///         Place::new("b", "Candi B", "Budaya", "ancient temple", 20000, 4.6),
///         Place::new("c", "Pantai C", "Bahari", "sandy beach", 5000, 4.4),
///     ])
///     .unwrap(),
/// );
///
/// let index = build_index(dataset, SignalWeights::default()).unwrap();
/// assert!(index.combined().is_symmetric());
/// assert!(index.score(0, 1) > index.score(0, 2));
/// ```
pub fn build_index(dataset: Arc<Dataset>, weights: SignalWeights) -> Result<SimilarityIndex> {
    build_index_with_config(dataset, weights, &TfidfConfig::default())
}

/// Build an index with explicit vectorizer settings.
pub fn build_index_with_config(
    dataset: Arc<Dataset>,
    weights: SignalWeights,
    config: &TfidfConfig,
) -> Result<SimilarityIndex> {
    weights.validate()?;

    let mut signals = AHashMap::new();
    for signal in weights.active_signals() {
        let matrix = signal_matrix(&dataset, signal, config)?;
        signals.insert(signal, Arc::new(matrix));
    }

    SimilarityIndex::from_signals(dataset, weights, signals)
}

/// Compute the similarity matrix of one signal over `dataset`.
pub fn signal_matrix(
    dataset: &Dataset,
    signal: Signal,
    config: &TfidfConfig,
) -> Result<SimilarityMatrix> {
    log::debug!(
        "computing {signal} similarity for {} places",
        dataset.len()
    );

    match signal {
        Signal::Description => {
            let vectorizer = TfidfVectorizer::with_config(config.clone())?;
            let features = vectorizer.fit_transform(&dataset.descriptions())?;
            cosine_similarity_matrix(features.rows())
        }
        Signal::Price => {
            column_similarity_matrix(&normalize_by_max(signal.name(), &dataset.prices())?)
        }
        Signal::Rating => {
            column_similarity_matrix(&normalize_by_max(signal.name(), &dataset.ratings())?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WisataError;
    use crate::place::Place;

    fn dataset() -> Arc<Dataset> {
        Arc::new(
            Dataset::new(vec![
                Place::new("1", "Candi Prambanan", "Budaya", "hindu temple compound", 50000, 4.7),
                Place::new("2", "Candi Sewu", "Budaya", "buddhist temple compound", 10000, 4.6),
                Place::new("3", "Pantai Baron", "Bahari", "fishing beach with caves", 10000, 4.3),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_inactive_signals_are_not_computed() {
        let index = build_index(dataset(), SignalWeights::default()).unwrap();
        assert!(index.signal(Signal::Description).is_some());
        assert!(index.signal(Signal::Price).is_none());
        assert!(index.signal(Signal::Rating).is_none());
    }

    #[test]
    fn test_description_only_equals_text_matrix() {
        let index = build_index(dataset(), SignalWeights::default()).unwrap();
        assert_eq!(
            index.combined(),
            index.signal(Signal::Description).unwrap()
        );
    }

    #[test]
    fn test_all_signals() {
        let weights = SignalWeights::new(0.5, 0.25, 0.25);
        let index = build_index(dataset(), weights).unwrap();
        assert!(index.combined().is_symmetric());

        let expected = 0.5 * index.signal(Signal::Description).unwrap().get(0, 1)
            + 0.25 * index.signal(Signal::Price).unwrap().get(0, 1)
            + 0.25 * index.signal(Signal::Rating).unwrap().get(0, 1);
        assert!((index.score(0, 1) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_one_dimensional_numeric_similarity_is_one() {
        let weights = SignalWeights::new(0.0, 1.0, 0.0);
        let index = build_index(dataset(), weights).unwrap();
        assert!(index.combined().values().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_invalid_weights() {
        let result = build_index(dataset(), SignalWeights::new(0.0, 0.0, 0.0));
        assert!(matches!(result, Err(WisataError::InvalidArgument(_))));
    }

    #[test]
    fn test_degenerate_price_only_when_weighted() {
        let places = vec![
            Place::new("1", "A", "X", "temple ruins", 10000, 4.0),
            Place::new("2", "B", "X", "beach sand", 10000, 4.5),
        ];
        let dataset = Arc::new(Dataset::new(places).unwrap());

        assert!(build_index(dataset.clone(), SignalWeights::default()).is_ok());
        assert!(matches!(
            build_index(dataset, SignalWeights::new(1.0, 0.5, 0.0)),
            Err(WisataError::DegenerateColumn { .. })
        ));
    }
}

//! Top-N recommendations from a similarity index.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::combine::Signal;
use crate::dataset::filter::PlaceFilter;
use crate::error::{Result, WisataError};
use crate::index::SimilarityIndex;
use crate::place::PlaceId;

/// Per-signal similarity between the query and a recommended place.
///
/// Signals that were inactive in the index are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalScores {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// A recommended place and its combined similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub place_id: PlaceId,
    pub score: f64,
    pub breakdown: SignalScores,
}

/// Recommend the `top_n` places most similar to `place_id`.
///
/// Results are ordered by descending combined score; ties keep dataset
/// order. The query place is never part of the result. When fewer than
/// `top_n` other places exist, all of them are returned.
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
/// use wisata::recommend::recommend;
///
/// let dataset = Arc::new(
///     Dataset::new(vec![
///         Place::new("a", "Candi A", "Budaya", "ancient temple stone", 10000, 4.5),
///         Place::new("b", "Candi B", "Budaya", "ancient temple", 20000, 4.6),
///         Place::new("c", "Candi C", "Budaya", "temple", 5000, 4.4),
///     ])
///     .unwrap(),
/// );
/// let index = build_index(dataset, SignalWeights::default()).unwrap();
///
/// let ids: Vec<_> = recommend(&index, "a", 2)
///     .unwrap()
///     .into_iter()
///     .map(|r| r.place_id.to_string())
///     .collect();
/// assert_eq!(ids, vec!["b", "c"]);
/// ```
pub fn recommend(
    index: &SimilarityIndex,
    place_id: &str,
    top_n: usize,
) -> Result<Vec<Recommendation>> {
    rank(index, place_id, top_n, None)
}

/// Like [`recommend`], keeping only candidates accepted by `filter`.
///
/// The ranking still uses the similarities over the full dataset; the
/// filter only removes candidates before truncation.
pub fn recommend_filtered(
    index: &SimilarityIndex,
    place_id: &str,
    top_n: usize,
    filter: &PlaceFilter,
) -> Result<Vec<Recommendation>> {
    rank(index, place_id, top_n, Some(filter))
}

fn rank(
    index: &SimilarityIndex,
    place_id: &str,
    top_n: usize,
    filter: Option<&PlaceFilter>,
) -> Result<Vec<Recommendation>> {
    if top_n == 0 {
        return Err(WisataError::invalid_argument("top_n must be at least 1"));
    }

    let dataset = index.dataset();
    let query = dataset
        .index_of(place_id)
        .ok_or_else(|| WisataError::unknown_place(place_id))?;
    let query_id = &dataset.places()[query].id;
    let scores = index
        .combined()
        .row(query)
        .ok_or_else(|| WisataError::unknown_place(place_id))?;

    let mut candidates: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    // `sort_by` is stable, so equal scores keep dataset order.
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let recommendations = candidates
        .into_iter()
        .filter_map(|(row, score)| dataset.place(row).map(|place| (row, score, place)))
        .filter(|(_, _, place)| &place.id != query_id)
        .filter(|(_, _, place)| filter.is_none_or(|f| f.matches(place)))
        .take(top_n)
        .map(|(row, score, place)| Recommendation {
            place_id: place.id.clone(),
            score,
            breakdown: breakdown(index, query, row),
        })
        .collect();

    Ok(recommendations)
}

fn breakdown(index: &SimilarityIndex, i: usize, j: usize) -> SignalScores {
    let score = |signal| index.signal(signal).map(|m| m.get(i, j));
    SignalScores {
        description: score(Signal::Description),
        price: score(Signal::Price),
        rating: score(Signal::Rating),
    }
}

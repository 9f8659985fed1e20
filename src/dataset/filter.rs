//! Display filters over a dataset.
//!
//! Filters select which places are shown (or offered as recommendations).
//! They produce views and never feed the similarity index, so changing a
//! filter does not change any similarity score.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::place::Place;

/// Criteria for selecting places. Unset criteria match everything.
///
/// # Examples
///
/// ```
/// use wisata::dataset::filter::PlaceFilter;
/// use wisata::place::Place;
///
/// let filter = PlaceFilter::new()
///     .with_category("budaya")
///     .with_min_rating(4.5)
///     .with_price_range(None, Some(20000));
///
/// let temple = Place::new("1", "Candi Sewu", "Budaya", "temple", 10000, 4.6);
/// let beach = Place::new("2", "Pantai Baron", "Bahari", "beach", 10000, 4.6);
///
/// assert!(filter.matches(&temple));
/// assert!(!filter.matches(&beach));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceFilter {
    /// Category, compared case-insensitively.
    pub category: Option<String>,
    /// Minimum rating, inclusive.
    pub min_rating: Option<f64>,
    /// Minimum price, inclusive.
    pub min_price: Option<u64>,
    /// Maximum price, inclusive.
    pub max_price: Option<u64>,
    /// Text that must appear in the name or description (case-insensitive).
    pub search: Option<String>,
}

impl PlaceFilter {
    /// Create a filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn with_price_range(mut self, min_price: Option<u64>, max_price: Option<u64>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        self.search = Some(search.into());
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Check whether `place` passes every criterion.
    pub fn matches(&self, place: &Place) -> bool {
        if let Some(category) = &self.category
            && !place.category.eq_ignore_ascii_case(category.trim())
        {
            return false;
        }
        if let Some(min_rating) = self.min_rating
            && place.rating < min_rating
        {
            return false;
        }
        if let Some(min_price) = self.min_price
            && place.price < min_price
        {
            return false;
        }
        if let Some(max_price) = self.max_price
            && place.price > max_price
        {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty()
                && !place.name.to_lowercase().contains(&needle)
                && !place.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    /// Places of `dataset` that pass the filter, in dataset order.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Place> {
        dataset.places().iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Place::new("1", "Candi Prambanan", "Budaya", "Hindu temple compound", 50000, 4.7),
            Place::new("2", "Pantai Parangtritis", "Bahari", "Black sand beach", 10000, 4.4),
            Place::new("3", "Taman Sari", "Budaya", "Royal water garden", 15000, 4.6),
            Place::new("4", "Malioboro", "Belanja", "Shopping street", 0, 4.7),
        ])
        .unwrap()
    }

    fn ids(places: Vec<&Place>) -> Vec<&str> {
        places.into_iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let dataset = dataset();
        let filter = PlaceFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&dataset).len(), 4);
    }

    #[test]
    fn test_category_is_case_insensitive() {
        let dataset = dataset();
        let filter = PlaceFilter::new().with_category("BUDAYA");
        assert_eq!(ids(filter.apply(&dataset)), vec!["1", "3"]);
    }

    #[test]
    fn test_rating_and_price_bounds_are_inclusive() {
        let dataset = dataset();
        let filter = PlaceFilter::new()
            .with_min_rating(4.6)
            .with_price_range(Some(0), Some(15000));
        assert_eq!(ids(filter.apply(&dataset)), vec!["3", "4"]);
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let dataset = dataset();
        assert_eq!(
            ids(PlaceFilter::new().with_search("sand").apply(&dataset)),
            vec!["2"]
        );
        assert_eq!(
            ids(PlaceFilter::new().with_search("taman").apply(&dataset)),
            vec!["3"]
        );
        assert_eq!(PlaceFilter::new().with_search("  ").apply(&dataset).len(), 4);
    }

    #[test]
    fn test_apply_does_not_touch_dataset() {
        let dataset = dataset();
        let version = dataset.version();
        let _ = PlaceFilter::new().with_category("Bahari").apply(&dataset);
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.version(), version);
    }
}

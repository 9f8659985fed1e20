//! Validated, immutable place datasets.
//!
//! A [`Dataset`] is built once per session, checked against the invariants
//! the similarity pipeline relies on, and never mutated afterwards. Display
//! filters produce views over it (see [`filter`]); they never change the
//! rows the similarity index is built from.

pub mod csv;
pub mod filter;
pub mod price;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WisataError};
use crate::place::{Place, PlaceId};

/// Optional fields present in a dataset, detected once at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetCapabilities {
    /// At least one place has coordinates (map display possible).
    pub has_coordinates: bool,
    /// At least one place has an image URL.
    pub has_images: bool,
}

/// An immutable collection of places in source order.
///
/// # Examples
///
/// ```
/// use wisata::dataset::Dataset;
/// use wisata::place::Place;
///
/// let dataset = Dataset::new(vec![
///     Place::new("1", "Candi Borobudur", "Budaya", "buddhist temple", 50000, 4.8),
///     Place::new("2", "Pantai Indrayanti", "Bahari", "white sand beach", 10000, 4.5),
/// ])
/// .unwrap();
///
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.index_of("2"), Some(1));
/// assert!(!dataset.capabilities().has_coordinates);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    places: Vec<Place>,
    positions: AHashMap<PlaceId, usize>,
    version: u64,
    capabilities: DatasetCapabilities,
}

impl Dataset {
    /// Validate `places` and build a dataset.
    ///
    /// Fails with [`WisataError::InvalidArgument`] when the list is empty,
    /// an id is blank or duplicated, a description is blank, or a rating is
    /// negative or not finite.
    pub fn new(places: Vec<Place>) -> Result<Self> {
        if places.is_empty() {
            return Err(WisataError::invalid_argument("dataset has no places"));
        }

        let mut positions = AHashMap::with_capacity(places.len());
        for (row, place) in places.iter().enumerate() {
            if place.id.as_str().trim().is_empty() {
                return Err(WisataError::invalid_argument(format!(
                    "place at row {row} has an empty id"
                )));
            }
            if place.description.trim().is_empty() {
                return Err(WisataError::invalid_argument(format!(
                    "place '{}' has an empty description",
                    place.id
                )));
            }
            if !place.rating.is_finite() || place.rating < 0.0 {
                return Err(WisataError::invalid_argument(format!(
                    "place '{}' has invalid rating {}",
                    place.id, place.rating
                )));
            }
            if positions.insert(place.id.clone(), row).is_some() {
                return Err(WisataError::invalid_argument(format!(
                    "duplicate place id '{}'",
                    place.id
                )));
            }
        }

        let capabilities = DatasetCapabilities {
            has_coordinates: places.iter().any(|p| p.coordinates.is_some()),
            has_images: places.iter().any(|p| p.image_url.is_some()),
        };
        let version = content_version(&places);

        Ok(Dataset {
            places,
            positions,
            version,
            capabilities,
        })
    }

    /// Number of places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// True when there are no places. [`Dataset::new`] rejects an empty list.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// All places in source order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Row of the place with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Place with the given id.
    pub fn get(&self, id: &str) -> Option<&Place> {
        self.index_of(id).map(|row| &self.places[row])
    }

    /// Place at `row`.
    pub fn place(&self, row: usize) -> Option<&Place> {
        self.places.get(row)
    }

    /// Content checksum; equal data yields an equal version across runs.
    ///
    /// Different data may share a version. Use [`Dataset::same_content`]
    /// to tell two datasets apart.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// True when both datasets hold the same places in the same order.
    pub fn same_content(&self, other: &Dataset) -> bool {
        std::ptr::eq(self, other) || (self.version == other.version && self.places == other.places)
    }

    /// Optional fields available in this dataset.
    pub fn capabilities(&self) -> DatasetCapabilities {
        self.capabilities
    }

    /// Descriptions in row order.
    pub fn descriptions(&self) -> Vec<&str> {
        self.places.iter().map(|p| p.description.as_str()).collect()
    }

    /// Prices in row order.
    pub fn prices(&self) -> Vec<f64> {
        self.places.iter().map(|p| p.price as f64).collect()
    }

    /// Ratings in row order.
    pub fn ratings(&self) -> Vec<f64> {
        self.places.iter().map(|p| p.rating).collect()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = AHashSet::new();
        self.places
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }
}

fn content_version(places: &[Place]) -> u64 {
    let mut hasher = crc32fast::Hasher::new();
    for place in places {
        for field in [
            place.id.as_str(),
            place.name.as_str(),
            place.category.as_str(),
            place.description.as_str(),
        ] {
            hasher.update(field.as_bytes());
            hasher.update(&[0]);
        }
        hasher.update(&place.price.to_le_bytes());
        hasher.update(&place.rating.to_bits().to_le_bytes());
        if let Some(coordinates) = place.coordinates {
            hasher.update(&coordinates.latitude.to_bits().to_le_bytes());
            hasher.update(&coordinates.longitude.to_bits().to_le_bytes());
        }
        if let Some(url) = &place.image_url {
            hasher.update(url.as_bytes());
        }
        hasher.update(&[0xff]);
    }
    ((places.len() as u64) << 32) | u64::from(hasher.finalize())
}

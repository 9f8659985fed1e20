//! Place records: the rows of a destination dataset.
//!
//! A [`Place`] carries the display fields shown to a user, the free-text
//! description that feeds the text signal, and the numeric price and rating
//! that feed the numeric signals. Coordinates and image URLs are optional;
//! whether a dataset carries them at all is recorded once in
//! [`DatasetCapabilities`](crate::dataset::DatasetCapabilities).

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a place within a dataset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    /// Create a new place id.
    pub fn new<S: Into<String>>(id: S) -> Self {
        PlaceId(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(id: &str) -> Self {
        PlaceId(id.to_string())
    }
}

impl From<String> for PlaceId {
    fn from(id: String) -> Self {
        PlaceId(id)
    }
}

impl From<&PlaceId> for PlaceId {
    fn from(id: &PlaceId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for PlaceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Geographic position of a place.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single tourist destination.
///
/// # Examples
///
/// ```
/// use wisata::place::Place;
///
/// let place = Place::new("1", "Candi Prambanan", "Budaya", "ancient hindu temple", 50000, 4.7)
///     .with_coordinates(-7.752, 110.491);
///
/// assert_eq!(place.id.as_str(), "1");
/// assert!(place.coordinates.is_some());
/// assert!(place.image_url.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Unique identifier
    pub id: PlaceId,
    /// Display name
    pub name: String,
    /// Display category (e.g. "Budaya", "Taman Hiburan")
    pub category: String,
    /// Free-text description, source of the text signal
    pub description: String,
    /// Entrance price in Rupiah
    pub price: u64,
    /// Average visitor rating
    pub rating: f64,
    /// Optional geographic position
    pub coordinates: Option<Coordinates>,
    /// Optional picture of the place
    pub image_url: Option<String>,
}

impl Place {
    /// Create a place without coordinates or image.
    pub fn new<I, N, C, D>(
        id: I,
        name: N,
        category: C,
        description: D,
        price: u64,
        rating: f64,
    ) -> Self
    where
        I: Into<PlaceId>,
        N: Into<String>,
        C: Into<String>,
        D: Into<String>,
    {
        Place {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            description: description.into(),
            price,
            rating,
            coordinates: None,
            image_url: None,
        }
    }

    /// Attach coordinates.
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates {
            latitude,
            longitude,
        });
        self
    }

    /// Attach an image URL.
    pub fn with_image_url<S: Into<String>>(mut self, url: S) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

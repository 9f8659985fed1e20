//! # Wisata
//!
//! A content-based recommender for tourist destinations.
//!
//! Given a dataset of places, Wisata finds the places most similar to a
//! chosen one. Similarity combines three signals:
//!
//! - TF-IDF cosine similarity of the free-text descriptions
//! - similarity of the entrance prices, normalized by the column maximum
//! - similarity of the ratings, normalized the same way
//!
//! The signals are combined with caller-supplied weights into a single
//! similarity matrix, from which the top-N other places are returned.
//!
//! ```
//! use std::sync::Arc;
//!
//! use wisata::prelude::*;
//!
//! let dataset = Arc::new(
//!     Dataset::new(vec![
//!         Place::new("a", "Candi A", "Budaya", "ancient temple stone", 10000, 4.5),
//!         Place::new("b", "Candi B", "Budaya", "ancient temple", 20000, 4.6),
//!         Place::new("c", "Pantai C", "Bahari", "sandy beach", 5000, 4.4),
//!     ])
//!     .unwrap(),
//! );
//!
//! let index = build_index(dataset, SignalWeights::default()).unwrap();
//! let top = recommend(&index, "a", 1).unwrap();
//! assert_eq!(top[0].place_id.as_str(), "b");
//! ```

pub mod analysis;
pub mod cli;
pub mod combine;
pub mod config;
pub mod dataset;
pub mod error;
pub mod index;
pub mod normalize;
pub mod place;
pub mod recommend;
pub mod similarity;
pub mod vectorize;

pub mod prelude {
    pub use crate::combine::{Signal, SignalWeights};
    pub use crate::config::WisataConfig;
    pub use crate::dataset::Dataset;
    pub use crate::dataset::csv::CsvPlaceLoader;
    pub use crate::dataset::filter::PlaceFilter;
    pub use crate::error::{Result, WisataError};
    pub use crate::index::cache::IndexCache;
    pub use crate::index::{SimilarityIndex, build_index, build_index_with_config};
    pub use crate::place::{Place, PlaceId};
    pub use crate::recommend::{Recommendation, recommend, recommend_filtered};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

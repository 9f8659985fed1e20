//! Text feature extraction.
//!
//! [`tfidf::TfidfVectorizer`] turns descriptions into [`sparse::SparseVector`]
//! rows over a shared vocabulary.

pub mod sparse;
pub mod tfidf;

//! Pairwise similarity computation.
//!
//! - [`matrix::SimilarityMatrix`] stores an `N x N` similarity table.
//! - [`cosine`] builds one from feature vectors (sparse TF-IDF rows or
//!   one-dimensional numeric columns).

pub mod cosine;
pub mod matrix;

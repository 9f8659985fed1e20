//! Cosine similarity and the pairwise matrix builder.
//!
//! The cosine of two vectors is `a · b / (|a| |b|)`. A vector with zero
//! magnitude has similarity 0 to everything, itself included, so the result
//! never contains NaN.

use rayon::prelude::*;

use crate::error::{Result, WisataError};
use crate::similarity::matrix::SimilarityMatrix;
use crate::vectorize::sparse::SparseVector;

/// A feature vector that supports the operations cosine similarity needs.
pub trait FeatureVector: Sync {
    /// Logical dimension.
    fn dimension(&self) -> usize;

    /// Dot product with a vector of the same dimension.
    fn dot(&self, other: &Self) -> f64;

    /// Euclidean (L2) norm.
    fn norm(&self) -> f64;
}

impl FeatureVector for SparseVector {
    fn dimension(&self) -> usize {
        SparseVector::dimension(self)
    }

    fn dot(&self, other: &Self) -> f64 {
        SparseVector::dot(self, other)
    }

    fn norm(&self) -> f64 {
        SparseVector::norm(self)
    }
}

impl FeatureVector for Vec<f64> {
    fn dimension(&self) -> usize {
        self.len()
    }

    fn dot(&self, other: &Self) -> f64 {
        self.iter().zip(other.iter()).map(|(a, b)| a * b).sum()
    }

    fn norm(&self) -> f64 {
        self.iter().map(|x| x * x).sum::<f64>().sqrt()
    }
}

fn cosine_from_parts(dot: f64, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

/// Cosine similarity of two vectors.
///
/// # Examples
///
/// ```
/// use wisata::similarity::cosine::cosine_similarity;
///
/// let a = vec![1.0, 2.0, 3.0];
/// assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
/// assert_eq!(cosine_similarity(&a, &vec![0.0, 0.0, 0.0]), 0.0);
/// ```
pub fn cosine_similarity<V: FeatureVector>(a: &V, b: &V) -> f64 {
    cosine_from_parts(a.dot(b), a.norm(), b.norm())
}

/// Compute the `N x N` cosine similarity matrix of `vectors`.
///
/// Rows are computed in parallel. Only the upper triangle is evaluated and
/// mirrored, so the result is exactly symmetric. The diagonal is exactly 1
/// for non-zero vectors and 0 for zero vectors.
///
/// Fails with [`WisataError::InvalidArgument`] if the vectors do not share
/// one dimension.
///
/// # Examples
///
/// ```
/// use wisata::similarity::cosine::cosine_similarity_matrix;
///
/// let vectors = vec![vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 0.0]];
/// let m = cosine_similarity_matrix(&vectors).unwrap();
///
/// assert_eq!(m.get(0, 0), 1.0);
/// assert!((m.get(0, 1) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// assert_eq!(m.get(2, 2), 0.0);
/// ```
pub fn cosine_similarity_matrix<V: FeatureVector>(vectors: &[V]) -> Result<SimilarityMatrix> {
    let n = vectors.len();
    if let Some(first) = vectors.first() {
        let dimension = first.dimension();
        if let Some((row, v)) = vectors
            .iter()
            .enumerate()
            .find(|(_, v)| v.dimension() != dimension)
        {
            return Err(WisataError::invalid_argument(format!(
                "vector {row} has dimension {}, expected {dimension}",
                v.dimension()
            )));
        }
    }

    let norms: Vec<f64> = vectors.par_iter().map(FeatureVector::norm).collect();

    let upper: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            (i..n)
                .map(|j| {
                    if i == j {
                        if norms[i] > 0.0 { 1.0 } else { 0.0 }
                    } else {
                        cosine_from_parts(vectors[i].dot(&vectors[j]), norms[i], norms[j])
                    }
                })
                .collect()
        })
        .collect();

    let mut matrix = SimilarityMatrix::zeros(n);
    for (i, row) in upper.into_iter().enumerate() {
        for (offset, value) in row.into_iter().enumerate() {
            let j = i + offset;
            matrix.set(i, j, value);
            matrix.set(j, i, value);
        }
    }

    log::debug!("built {n}x{n} cosine similarity matrix");

    Ok(matrix)
}

/// Cosine similarity matrix of a single numeric column, each value treated
/// as a one-dimensional vector.
pub fn column_similarity_matrix(values: &[f64]) -> Result<SimilarityMatrix> {
    let vectors: Vec<Vec<f64>> = values.iter().map(|&v| vec![v]).collect();
    cosine_similarity_matrix(&vectors)
}

//! Dense square similarity matrices.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WisataError};

/// A dense, square, row-major matrix of pairwise similarities.
///
/// Entry `(i, j)` is the similarity between place `i` and place `j` in
/// dataset order.
///
/// # Examples
///
/// ```
/// use wisata::similarity::matrix::SimilarityMatrix;
///
/// let m = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
/// assert_eq!(m.size(), 2);
/// assert_eq!(m.get(0, 1), 0.5);
/// assert!(m.is_symmetric());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Create an all-zero `size x size` matrix.
    pub fn zeros(size: usize) -> Self {
        SimilarityMatrix {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Build a matrix from explicit rows. Every row must have `rows.len()`
    /// entries.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(WisataError::invalid_argument(format!(
                    "row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            values.extend(row);
        }
        Ok(SimilarityMatrix { size, values })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Entry `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.size && j < self.size, "index out of bounds");
        self.values[i * self.size + j]
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.size + j] = value;
    }

    /// Row `i`: the similarity of place `i` to every place, itself included.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.size {
            Some(&self.values[i * self.size..(i + 1) * self.size])
        } else {
            None
        }
    }

    /// All entries in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Check exact symmetry: `m[i][j] == m[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (i + 1..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Add `weight * other` into this matrix in place.
    pub fn add_scaled(&mut self, other: &SimilarityMatrix, weight: f64) -> Result<()> {
        if other.size != self.size {
            return Err(WisataError::invalid_argument(format!(
                "matrix size mismatch: {} vs {}",
                self.size, other.size
            )));
        }
        for (target, value) in self.values.iter_mut().zip(other.values.iter()) {
            *target += weight * value;
        }
        Ok(())
    }
}

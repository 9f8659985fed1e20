//! Sparse feature vectors.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WisataError};

/// A sparse vector stored as parallel, index-sorted arrays.
///
/// # Examples
///
/// ```
/// use wisata::vectorize::sparse::SparseVector;
///
/// let a = SparseVector::from_pairs(4, vec![(0, 1.0), (2, 2.0)]).unwrap();
/// let b = SparseVector::from_pairs(4, vec![(2, 3.0), (3, 1.0)]).unwrap();
/// assert_eq!(a.dot(&b), 6.0);
/// assert_eq!(a.nnz(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    dimension: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Create an all-zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        SparseVector {
            dimension,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a vector from `(index, value)` pairs.
    ///
    /// Pairs are sorted by index; zero values are dropped. Duplicate or
    /// out-of-range indices are rejected.
    pub fn from_pairs(dimension: usize, mut pairs: Vec<(usize, f64)>) -> Result<Self> {
        pairs.sort_by_key(|&(index, _)| index);

        let mut indices = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());
        for (index, value) in pairs {
            if index >= dimension {
                return Err(WisataError::invalid_argument(format!(
                    "index {index} out of range for dimension {dimension}"
                )));
            }
            if indices.last() == Some(&index) {
                return Err(WisataError::invalid_argument(format!(
                    "duplicate index {index} in sparse vector"
                )));
            }
            if value != 0.0 {
                indices.push(index);
                values.push(value);
            }
        }

        Ok(SparseVector {
            dimension,
            indices,
            values,
        })
    }

    /// Logical dimension of the vector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored non-zero entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Iterate over `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Get the value at `index` (zero when not stored).
    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Dot product with another sparse vector (merge of the two index lists).
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    /// Euclidean (L2) norm.
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scale the vector to unit L2 norm. Zero vectors are left unchanged.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.values {
                *value /= norm;
            }
        }
    }

    /// Expand into a dense vector.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for (index, value) in self.iter() {
            dense[index] = value;
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_sorts_and_drops_zeros() {
        let v = SparseVector::from_pairs(5, vec![(3, 1.5), (0, 2.0), (1, 0.0)]).unwrap();
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(0, 2.0), (3, 1.5)]);
        assert_eq!(v.get(1), 0.0);
        assert_eq!(v.get(3), 1.5);
        assert_eq!(v.to_dense(), vec![2.0, 0.0, 0.0, 1.5, 0.0]);
    }

    #[test]
    fn test_from_pairs_rejects_bad_indices() {
        assert!(SparseVector::from_pairs(2, vec![(2, 1.0)]).is_err());
        assert!(SparseVector::from_pairs(3, vec![(1, 1.0), (1, 2.0)]).is_err());
    }

    #[test]
    fn test_dot_and_norm() {
        let a = SparseVector::from_pairs(3, vec![(0, 3.0), (1, 4.0)]).unwrap();
        let b = SparseVector::from_pairs(3, vec![(1, 2.0), (2, 7.0)]).unwrap();
        assert_eq!(a.dot(&b), 8.0);
        assert_eq!(a.norm(), 5.0);
        assert_eq!(a.dot(&SparseVector::zeros(3)), 0.0);
    }

    #[test]
    fn test_normalize() {
        let mut a = SparseVector::from_pairs(2, vec![(0, 3.0), (1, 4.0)]).unwrap();
        a.normalize();
        assert!((a.norm() - 1.0).abs() < 1e-12);
        assert!((a.get(0) - 0.6).abs() < 1e-12);

        let mut zero = SparseVector::zeros(2);
        zero.normalize();
        assert_eq!(zero.norm(), 0.0);
    }
}

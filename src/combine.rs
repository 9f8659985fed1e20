//! Weighted combination of per-signal similarity matrices.
//!
//! ```text
//! final[i][j] = w_desc * desc[i][j] + w_price * price[i][j] + w_rating * rating[i][j]
//! ```
//!
//! Weights are not renormalized. A weight of zero excludes its signal
//! entirely: the matrix for that signal is neither required nor read.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WisataError};
use crate::similarity::matrix::SimilarityMatrix;

/// One independent basis for similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// TF-IDF cosine similarity of descriptions.
    Description,
    /// Cosine similarity of normalized prices.
    Price,
    /// Cosine similarity of normalized ratings.
    Rating,
}

impl Signal {
    /// All signals in combination order.
    pub const ALL: [Signal; 3] = [Signal::Description, Signal::Price, Signal::Rating];

    /// Get the name of this signal.
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Description => "description",
            Signal::Price => "price",
            Signal::Rating => "rating",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-negative weights for the three signals.
///
/// The default (`1, 0, 0`) ranks by description similarity alone.
///
/// # Examples
///
/// ```
/// use wisata::combine::{Signal, SignalWeights};
///
/// let weights = SignalWeights::new(0.6, 0.2, 0.2);
/// assert!(weights.validate().is_ok());
/// assert_eq!(weights.weight(Signal::Price), 0.2);
/// assert_eq!(weights.active_signals().count(), 3);
///
/// assert!(SignalWeights::new(1.0, -0.5, 0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    /// Weight of the description signal.
    pub description: f64,
    /// Weight of the price signal.
    pub price: f64,
    /// Weight of the rating signal.
    pub rating: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            description: 1.0,
            price: 0.0,
            rating: 0.0,
        }
    }
}

impl SignalWeights {
    /// Create a weight triple.
    pub fn new(description: f64, price: f64, rating: f64) -> Self {
        Self {
            description,
            price,
            rating,
        }
    }

    /// Weight of `signal`.
    pub fn weight(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Description => self.description,
            Signal::Price => self.price,
            Signal::Rating => self.rating,
        }
    }

    /// Signals with a positive weight, in combination order.
    pub fn active_signals(&self) -> impl Iterator<Item = Signal> + '_ {
        Signal::ALL.into_iter().filter(|&s| self.weight(s) > 0.0)
    }

    /// Check that every weight is finite and non-negative and that at least
    /// one is positive.
    pub fn validate(&self) -> Result<()> {
        for signal in Signal::ALL {
            let weight = self.weight(signal);
            if !weight.is_finite() || weight < 0.0 {
                return Err(WisataError::invalid_argument(format!(
                    "{signal} weight must be a finite, non-negative number, got {weight}"
                )));
            }
        }
        if self.active_signals().next().is_none() {
            return Err(WisataError::invalid_argument(
                "at least one signal weight must be positive",
            ));
        }
        Ok(())
    }

    /// Bit pattern of the weights, usable as an exact cache key.
    pub fn cache_key(&self) -> [u64; 3] {
        // +0.0 and -0.0 compare equal but differ in bits.
        let bits = |w: f64| if w == 0.0 { 0 } else { w.to_bits() };
        [
            bits(self.description),
            bits(self.price),
            bits(self.rating),
        ]
    }
}

/// Combine per-signal matrices into the final similarity matrix.
///
/// `matrix_for` supplies the matrix of each active signal; inactive signals
/// are never requested. All supplied matrices must share one size.
pub fn combine<'a, F>(
    size: usize,
    weights: &SignalWeights,
    mut matrix_for: F,
) -> Result<SimilarityMatrix>
where
    F: FnMut(Signal) -> Option<&'a SimilarityMatrix>,
{
    weights.validate()?;

    let mut combined = SimilarityMatrix::zeros(size);
    for signal in weights.active_signals() {
        let matrix = matrix_for(signal).ok_or_else(|| {
            WisataError::invalid_argument(format!("missing similarity matrix for {signal}"))
        })?;
        combined.add_scaled(matrix, weights.weight(signal))?;
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> SimilarityMatrix {
        SimilarityMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_weighted_sum() {
        let desc = matrix(vec![vec![1.0, 0.2], vec![0.2, 1.0]]);
        let price = matrix(vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
        let rating = matrix(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let weights = SignalWeights::new(0.5, 2.0, 1.0);

        let combined = combine(2, &weights, |signal| match signal {
            Signal::Description => Some(&desc),
            Signal::Price => Some(&price),
            Signal::Rating => Some(&rating),
        })
        .unwrap();

        assert_eq!(combined.get(0, 0), 0.5 + 2.0 + 1.0);
        assert_eq!(combined.get(0, 1), 0.5 * 0.2 + 2.0);
        assert!(combined.is_symmetric());
    }

    #[test]
    fn test_zero_weights_exclude_signals() {
        let desc = matrix(vec![vec![1.0, 0.3], vec![0.3, 1.0]]);
        let weights = SignalWeights::new(1.0, 0.0, 0.0);

        let combined = combine(2, &weights, |signal| match signal {
            Signal::Description => Some(&desc),
            _ => panic!("inactive signal {signal} requested"),
        })
        .unwrap();

        assert_eq!(combined, desc);
    }

    #[test]
    fn test_missing_matrix() {
        let weights = SignalWeights::new(1.0, 1.0, 0.0);
        let desc = matrix(vec![vec![1.0]]);
        let result = combine(1, &weights, |signal| match signal {
            Signal::Description => Some(&desc),
            _ => None,
        });
        assert!(matches!(result, Err(WisataError::InvalidArgument(_))));
    }

    #[test]
    fn test_validation() {
        assert!(SignalWeights::default().validate().is_ok());
        assert!(SignalWeights::new(0.0, 0.0, 0.0).validate().is_err());
        assert!(SignalWeights::new(f64::NAN, 1.0, 0.0).validate().is_err());
        assert!(SignalWeights::new(1.0, f64::INFINITY, 0.0).validate().is_err());
        assert!(SignalWeights::new(3.0, 2.0, 5.0).validate().is_ok());
    }

    #[test]
    fn test_cache_key_treats_signed_zero_alike() {
        let a = SignalWeights::new(1.0, 0.0, 0.0);
        let b = SignalWeights::new(1.0, -0.0, 0.0);
        assert_eq!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), SignalWeights::new(1.0, 0.1, 0.0).cache_key());
    }

    #[test]
    fn test_signal_names() {
        assert_eq!(Signal::Description.to_string(), "description");
        assert_eq!(serde_json::to_string(&Signal::Rating).unwrap(), "\"rating\"");
    }
}

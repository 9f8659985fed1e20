//! Numeric column normalization.
//!
//! Price and rating live on very different scales (tens of thousands of
//! Rupiah versus one to five stars). Each column is rescaled independently by
//! dividing by its maximum so that every value lands in `[0, 1]`.

use crate::error::{Result, WisataError};

/// Divide every value by the column maximum.
///
/// Fails with [`WisataError::InvalidArgument`] for an empty column or a
/// negative/non-finite value, and with [`WisataError::DegenerateColumn`]
/// when the maximum is zero or every value is identical (a column without
/// variance carries no similarity signal).
///
/// # Examples
///
/// ```
/// use wisata::normalize::normalize_by_max;
///
/// let normalized = normalize_by_max("rating", &[2.0, 4.0, 5.0]).unwrap();
/// assert_eq!(normalized, vec![0.4, 0.8, 1.0]);
///
/// assert!(normalize_by_max("price", &[10000.0, 10000.0]).is_err());
/// ```
pub fn normalize_by_max(column: &str, values: &[f64]) -> Result<Vec<f64>> {
    let Some(&first) = values.first() else {
        return Err(WisataError::invalid_argument(format!(
            "column '{column}' has no values"
        )));
    };

    if let Some((row, value)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(WisataError::invalid_argument(format!(
            "column '{column}' has invalid value {value} at row {row}; expected a finite, non-negative number"
        )));
    }

    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max == 0.0 {
        return Err(WisataError::degenerate_column(column, "maximum is zero"));
    }
    if values.iter().all(|&v| v == first) {
        return Err(WisataError::degenerate_column(
            column,
            format!("every value is {first}"),
        ));
    }

    Ok(values.iter().map(|v| v / max).collect())
}

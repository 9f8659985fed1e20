//! Rupiah price parsing and formatting.
//!
//! Source datasets store prices as display strings such as `"Rp 10.000"`,
//! with `.` (or `,`) as the thousands separator and no fractional part.

use crate::error::{Result, WisataError};

/// Parse a Rupiah amount.
///
/// Accepts an optional `Rp` prefix (any case), whitespace, and `.` or `,`
/// thousands separators. Anything else is a [`WisataError::Parse`].
///
/// # Examples
///
/// ```
/// use wisata::dataset::price::parse_rupiah;
///
/// assert_eq!(parse_rupiah("Rp 10.000").unwrap(), 10000);
/// assert_eq!(parse_rupiah("Rp10,000").unwrap(), 10000);
/// assert_eq!(parse_rupiah("5000").unwrap(), 5000);
/// assert!(parse_rupiah("Rp").is_err());
/// ```
pub fn parse_rupiah(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    let amount = match trimmed.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("rp") => &trimmed[2..],
        _ => trimmed,
    };

    let digits: String = amount
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != ',')
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(WisataError::parse(format!("invalid price '{text}'")));
    }

    digits
        .parse::<u64>()
        .map_err(|e| WisataError::parse(format!("invalid price '{text}': {e}")))
}

/// Format an amount as `Rp` with `.` thousands separators.
///
/// # Examples
///
/// ```
/// use wisata::dataset::price::format_rupiah;
///
/// assert_eq!(format_rupiah(10000), "Rp 10.000");
/// assert_eq!(format_rupiah(0), "Rp 0");
/// ```
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("Rp {grouped}")
}

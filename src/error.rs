//! Error types for the Wisata library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`WisataError`] enum. The variants mirror the failure modes of the
//! recommendation pipeline: an unusable text signal, a degenerate numeric
//! column, an unknown place, or an invalid argument, plus the I/O and
//! parsing failures of the dataset loader.
//!
//! # Examples
//!
//! ```
//! use wisata::error::{Result, WisataError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(WisataError::invalid_argument("top_n must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::place::PlaceId;

/// The main error type for Wisata operations.
#[derive(Error, Debug)]
pub enum WisataError {
    /// No usable text signal: too few documents, an empty description, or
    /// every term was removed as a stop word.
    #[error("Empty vocabulary: {0}")]
    EmptyVocabulary(String),

    /// A numeric column cannot be normalized (maximum of zero, or every
    /// value identical).
    #[error("Degenerate column '{column}': {reason}")]
    DegenerateColumn { column: String, reason: String },

    /// The requested place id is not part of the dataset.
    #[error("Unknown place: {0}")]
    UnknownPlace(PlaceId),

    /// Invalid argument (bad `top_n`, negative weight, malformed place, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Errors while parsing dataset values (prices, ratings, coordinates)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV reader errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with WisataError.
pub type Result<T> = std::result::Result<T, WisataError>;

impl WisataError {
    /// Create a new empty vocabulary error.
    pub fn empty_vocabulary<S: Into<String>>(msg: S) -> Self {
        WisataError::EmptyVocabulary(msg.into())
    }

    /// Create a new degenerate column error.
    pub fn degenerate_column<C: Into<String>, R: Into<String>>(column: C, reason: R) -> Self {
        WisataError::DegenerateColumn {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Create a new unknown place error.
    pub fn unknown_place<P: Into<PlaceId>>(id: P) -> Self {
        WisataError::UnknownPlace(id.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        WisataError::InvalidArgument(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        WisataError::Analysis(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        WisataError::Parse(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        WisataError::Config(msg.into())
    }
}

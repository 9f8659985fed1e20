//! Configuration for the recommender and the command line front end.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```json
//! {
//!   "dataset": { "path": "data/tourism_with_id.csv", "delimiter": "," },
//!   "vectorizer": { "sublinear_tf": false },
//!   "weights": { "description": 0.7, "price": 0.15, "rating": 0.15 },
//!   "top_n": 5
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::combine::SignalWeights;
use crate::error::{Result, WisataError};
use crate::vectorize::tfidf::TfidfConfig;

/// Default number of recommendations.
pub const DEFAULT_TOP_N: usize = 5;

/// Where the place dataset comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// CSV file; the command line argument takes precedence.
    pub path: Option<PathBuf>,
    /// CSV delimiter.
    pub delimiter: char,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: ',',
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WisataConfig {
    pub dataset: DatasetConfig,
    pub vectorizer: TfidfConfig,
    pub weights: SignalWeights,
    pub top_n: usize,
}

impl Default for WisataConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            vectorizer: TfidfConfig::default(),
            weights: SignalWeights::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl WisataConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: WisataConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check the values that cannot be expressed in the types.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(WisataError::invalid_config("top_n must be at least 1"));
        }
        if !self.dataset.delimiter.is_ascii() {
            return Err(WisataError::invalid_config(format!(
                "delimiter must be an ASCII character, got '{}'",
                self.dataset.delimiter
            )));
        }
        self.weights
            .validate()
            .map_err(|e| WisataError::invalid_config(format!("weights: {e}")))
    }
}

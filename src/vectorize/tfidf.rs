//! TF-IDF vectorization of place descriptions.
//!
//! Every description is analyzed into terms, a shared vocabulary is built
//! from all surviving terms (sorted alphabetically, one column per term) and
//! each document becomes a sparse row of `tf * idf` weights.
//!
//! With the default configuration the weighting is
//!
//! ```text
//! tf(t, d)  = count of t in d
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! row       = row / ||row||₂
//! ```
//!
//! so a term present in every description gets the minimum weight and rare,
//! distinguishing terms get the highest.
//!
//! # Examples
//!
//! ```
//! use wisata::vectorize::tfidf::TfidfVectorizer;
//!
//! let vectorizer = TfidfVectorizer::new().unwrap();
//! let matrix = vectorizer
//!     .fit_transform(&["old temple ruins", "ancient temple site", "modern shopping mall"])
//!     .unwrap();
//!
//! assert_eq!(matrix.n_rows(), 3);
//! assert_eq!(matrix.n_terms(), 8);
//! assert!(matrix.idf("temple").unwrap() < matrix.idf("ruins").unwrap());
//! ```

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::{DEFAULT_TOKEN_PATTERN, RegexTokenizer};
use crate::error::{Result, WisataError};
use crate::vectorize::sparse::SparseVector;

/// Configuration for [`TfidfVectorizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfidfConfig {
    /// Add one to document frequencies as if an extra document contained
    /// every term once; prevents zero divisions.
    pub smooth_idf: bool,
    /// Replace raw term counts with `1 + ln(tf)`.
    pub sublinear_tf: bool,
    /// L2-normalize every row.
    pub normalize: bool,
    /// Regex used to extract tokens.
    pub token_pattern: String,
    /// Custom stop words; `None` uses the built-in English list.
    pub stop_words: Option<Vec<String>>,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            smooth_idf: true,
            sublinear_tf: false,
            normalize: true,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            stop_words: None,
        }
    }
}

/// Turns a corpus of descriptions into TF-IDF weighted sparse vectors.
#[derive(Clone)]
pub struct TfidfVectorizer {
    analyzer: Arc<dyn Analyzer>,
    config: TfidfConfig,
}

impl TfidfVectorizer {
    /// Create a vectorizer with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(TfidfConfig::default())
    }

    /// Create a vectorizer whose analyzer is built from `config`.
    pub fn with_config(config: TfidfConfig) -> Result<Self> {
        let tokenizer = RegexTokenizer::with_pattern(&config.token_pattern)?;
        let stop_filter = match &config.stop_words {
            Some(words) => StopFilter::from_words(words.iter().map(|w| w.to_lowercase())),
            None => StopFilter::new(),
        };
        let analyzer = StandardAnalyzer::with_parts(tokenizer, stop_filter)?;

        Ok(Self::with_analyzer(Arc::new(analyzer), config))
    }

    /// Create a vectorizer with a custom analyzer.
    ///
    /// `config.token_pattern` and `config.stop_words` are ignored; the
    /// analyzer decides which terms survive.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>, config: TfidfConfig) -> Self {
        TfidfVectorizer { analyzer, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }

    /// Learn the vocabulary and IDF weights from `documents` and return
    /// their TF-IDF rows.
    ///
    /// Fails with [`WisataError::EmptyVocabulary`] when fewer than two
    /// documents are given, when any document is blank, or when no term
    /// survives analysis.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<TfidfMatrix> {
        if documents.len() < 2 {
            return Err(WisataError::empty_vocabulary(format!(
                "at least 2 documents are required, got {}",
                documents.len()
            )));
        }

        let mut term_counts: Vec<AHashMap<String, usize>> = Vec::with_capacity(documents.len());
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();

        for (row, document) in documents.iter().enumerate() {
            let text = document.as_ref();
            if text.trim().is_empty() {
                return Err(WisataError::empty_vocabulary(format!(
                    "document {row} has an empty description"
                )));
            }

            let mut counts: AHashMap<String, usize> = AHashMap::new();
            for term in self.analyzer.terms(text)? {
                *counts.entry(term).or_insert(0) += 1;
            }
            for term in counts.keys() {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
            term_counts.push(counts);
        }

        if document_frequency.is_empty() {
            return Err(WisataError::empty_vocabulary(
                "no terms remain after stop-word removal",
            ));
        }

        let mut vocabulary: Vec<String> = document_frequency.keys().cloned().collect();
        vocabulary.sort_unstable();

        let n_documents = documents.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = document_frequency[term] as f64;
                if self.config.smooth_idf {
                    ((1.0 + n_documents) / (1.0 + df)).ln() + 1.0
                } else {
                    (n_documents / df).ln() + 1.0
                }
            })
            .collect();

        let columns: AHashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(column, term)| (term.as_str(), column))
            .collect();

        let dimension = vocabulary.len();
        let rows = term_counts
            .into_iter()
            .map(|counts| {
                let pairs = counts
                    .iter()
                    .map(|(term, &count)| {
                        let column = columns[term.as_str()];
                        let tf = if self.config.sublinear_tf {
                            1.0 + (count as f64).ln()
                        } else {
                            count as f64
                        };
                        (column, tf * idf[column])
                    })
                    .collect();

                let mut row = SparseVector::from_pairs(dimension, pairs)?;
                if self.config.normalize {
                    row.normalize();
                }
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "fitted tf-idf over {} documents with {} terms",
            documents.len(),
            dimension
        );

        Ok(TfidfMatrix {
            vocabulary,
            idf,
            rows,
        })
    }
}

impl fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("analyzer", &self.analyzer.name())
            .field("config", &self.config)
            .finish()
    }
}

/// Result of fitting a [`TfidfVectorizer`]: one sparse row per document over
/// a shared vocabulary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl TfidfMatrix {
    /// Number of documents.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Vocabulary size (dimension of every row).
    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    /// The vocabulary in column order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Column of `term`, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|candidate| candidate.as_str().cmp(term))
            .ok()
    }

    /// IDF weight of `term`, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|column| self.idf[column])
    }

    /// The TF-IDF row of document `row`.
    pub fn row(&self, row: usize) -> Option<&SparseVector> {
        self.rows.get(row)
    }

    /// All rows in document order.
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temple_corpus() -> TfidfMatrix {
        TfidfVectorizer::new()
            .unwrap()
            .fit_transform(&["old temple ruins", "ancient temple site", "modern shopping mall"])
            .unwrap()
    }

    #[test]
    fn test_vocabulary_is_sorted_and_shared() {
        let matrix = temple_corpus();
        assert_eq!(
            matrix.vocabulary(),
            &[
                "ancient", "mall", "modern", "old", "ruins", "shopping", "site", "temple"
            ]
        );
        for row in matrix.rows() {
            assert_eq!(row.dimension(), matrix.n_terms());
        }
    }

    #[test]
    fn test_smooth_idf_values() {
        let matrix = temple_corpus();
        // n = 3, df(temple) = 2, df(ruins) = 1
        let expected_temple = (4.0_f64 / 3.0).ln() + 1.0;
        let expected_ruins = (4.0_f64 / 2.0).ln() + 1.0;
        assert!((matrix.idf("temple").unwrap() - expected_temple).abs() < 1e-12);
        assert!((matrix.idf("ruins").unwrap() - expected_ruins).abs() < 1e-12);
        assert!(matrix.idf("the").is_none());
    }

    #[test]
    fn test_unsmoothed_idf() {
        let config = TfidfConfig {
            smooth_idf: false,
            ..Default::default()
        };
        let matrix = TfidfVectorizer::with_config(config)
            .unwrap()
            .fit_transform(&["beach sand", "beach cave"])
            .unwrap();

        // beach appears everywhere: ln(2 / 2) + 1
        assert!((matrix.idf("beach").unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.idf("sand").unwrap() - (2.0_f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let matrix = temple_corpus();
        for row in matrix.rows() {
            assert!((row.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_term_frequency_counts_repeats() {
        let config = TfidfConfig {
            normalize: false,
            ..Default::default()
        };
        let matrix = TfidfVectorizer::with_config(config)
            .unwrap()
            .fit_transform(&["cave cave lake", "lake forest"])
            .unwrap();

        let cave = matrix.term_index("cave").unwrap();
        let row = matrix.row(0).unwrap();
        assert!((row.get(cave) - 2.0 * matrix.idf("cave").unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_sublinear_tf() {
        let config = TfidfConfig {
            normalize: false,
            sublinear_tf: true,
            ..Default::default()
        };
        let matrix = TfidfVectorizer::with_config(config)
            .unwrap()
            .fit_transform(&["cave cave lake", "lake forest"])
            .unwrap();

        let cave = matrix.term_index("cave").unwrap();
        let expected = (1.0 + 2.0_f64.ln()) * matrix.idf("cave").unwrap();
        assert!((matrix.row(0).unwrap().get(cave) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_identical_text_gives_identical_rows() {
        let matrix = TfidfVectorizer::new()
            .unwrap()
            .fit_transform(&["Botanical garden", "botanical GARDEN", "zoo"])
            .unwrap();
        assert_eq!(matrix.row(0), matrix.row(1));
    }

    #[test]
    fn test_stop_words_are_not_in_vocabulary() {
        let matrix = TfidfVectorizer::new()
            .unwrap()
            .fit_transform(&["the beach is here", "a museum of the city"])
            .unwrap();
        assert_eq!(matrix.vocabulary(), &["beach", "city", "museum"]);
    }

    #[test]
    fn test_document_with_only_stop_words_gets_zero_row() {
        let matrix = TfidfVectorizer::new()
            .unwrap()
            .fit_transform(&["the and of", "waterfall"])
            .unwrap();
        assert_eq!(matrix.row(0).unwrap().nnz(), 0);
        assert_eq!(matrix.row(0).unwrap().norm(), 0.0);
    }

    #[test]
    fn test_custom_stop_words() {
        let config = TfidfConfig {
            stop_words: Some(vec!["Wisata".to_string(), "dan".to_string()]),
            ..Default::default()
        };
        let matrix = TfidfVectorizer::with_config(config)
            .unwrap()
            .fit_transform(&["wisata pantai dan laut", "wisata candi"])
            .unwrap();
        assert_eq!(matrix.vocabulary(), &["candi", "laut", "pantai"]);
    }

    #[test]
    fn test_too_few_documents() {
        let result = TfidfVectorizer::new().unwrap().fit_transform(&["only one"]);
        assert!(matches!(result, Err(WisataError::EmptyVocabulary(_))));
    }

    #[test]
    fn test_blank_description() {
        let result = TfidfVectorizer::new().unwrap().fit_transform(&["temple", "   "]);
        assert!(matches!(result, Err(WisataError::EmptyVocabulary(_))));
    }

    #[test]
    fn test_only_stop_words() {
        let result = TfidfVectorizer::new()
            .unwrap()
            .fit_transform(&["the and of", "is it a"]);
        assert!(matches!(result, Err(WisataError::EmptyVocabulary(_))));
    }

    #[test]
    fn test_invalid_token_pattern() {
        let config = TfidfConfig {
            token_pattern: "(".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            TfidfVectorizer::with_config(config),
            Err(WisataError::Analysis(_))
        ));
    }
}

//! The core analyzer trait.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that turn raw text into analyzed tokens.
///
/// # Examples
///
/// ```
/// use wisata::analysis::analyzer::analyzer::Analyzer;
/// use wisata::analysis::analyzer::standard::StandardAnalyzer;
///
/// let analyzer = StandardAnalyzer::new().unwrap();
/// let terms = analyzer.terms("The Old Temple").unwrap();
/// assert_eq!(terms, vec!["old", "temple"]);
/// ```
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze the given text and collect the surviving term strings.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}

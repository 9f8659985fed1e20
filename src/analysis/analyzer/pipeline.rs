//! Pipeline analyzer: a tokenizer followed by an ordered list of filters.

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// An analyzer that runs a tokenizer and then each filter in order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use wisata::analysis::analyzer::analyzer::Analyzer;
/// use wisata::analysis::analyzer::pipeline::PipelineAnalyzer;
/// use wisata::analysis::token_filter::lowercase::LowercaseFilter;
/// use wisata::analysis::tokenizer::regex::RegexTokenizer;
///
/// let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new().unwrap()))
///     .add_filter(Arc::new(LowercaseFilter::new()));
///
/// let terms = analyzer.terms("Goa Pindul").unwrap();
/// assert_eq!(terms, vec!["goa", "pindul"]);
/// ```
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the end of the chain.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

//! Standard analyzer used for place descriptions.
//!
//! # Pipeline
//!
//! 1. RegexTokenizer (two or more word characters)
//! 2. LowercaseFilter
//! 3. StopFilter (English stop words, or a custom list)
//!
//! # Examples
//!
//! ```
//! use wisata::analysis::analyzer::analyzer::Analyzer;
//! use wisata::analysis::analyzer::standard::StandardAnalyzer;
//!
//! let analyzer = StandardAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("A modern shopping mall in the city").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 4);
//! assert_eq!(tokens[0].text, "modern");
//! assert_eq!(tokens[3].text, "city");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

#[derive(Debug)]
pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    pub fn new() -> Result<Self> {
        Self::with_parts(RegexTokenizer::new()?, StopFilter::new())
    }

    /// Build the standard chain from an explicit tokenizer and stop list.
    pub fn with_parts(tokenizer: RegexTokenizer, stop_filter: StopFilter) -> Result<Self> {
        let analyzer = PipelineAnalyzer::new(Arc::new(tokenizer))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(stop_filter));

        Ok(StandardAnalyzer { inner: analyzer })
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

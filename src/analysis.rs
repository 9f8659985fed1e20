//! Text analysis for place descriptions.
//!
//! This module turns free text into the terms the TF-IDF vectorizer counts:
//! tokenization, lowercasing and stop-word removal, composed by an analyzer.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

//! Analyzers combine a tokenizer with a chain of filters.

pub mod analyzer;
pub mod pipeline;
pub mod standard;

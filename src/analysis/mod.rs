//! Text analysis module for termgate.
//!
//! This module provides tokenization, filtering and analysis pipelines, and
//! the consumer gate through which the stages of one pipeline decide who
//! writes the term text.

pub mod analyzer;
pub mod consumer;
pub mod lexicon;
pub mod morpheme;
pub mod session;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, AnalyzerConfig, MorphemeAnalyzer, StageReport};
pub use consumer::{
    ConsumerAttribute, ConsumerGate, ConsumerGuard, ConsumerId, ConsumerScope, SharedConsumerGate,
};
pub use lexicon::MorphemeLexicon;
pub use morpheme::Morpheme;
pub use session::{AnalysisSession, StageContext};
pub use token::{Token, TokenStream};
pub use token_filter::Filter;
pub use tokenizer::Tokenizer;

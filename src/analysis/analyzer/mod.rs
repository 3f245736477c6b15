//! Analyzer implementations that combine tokenizers and filters.

mod analyzer;
pub mod config;
mod morpheme;

pub use analyzer::Analyzer;
pub use config::{AnalyzerConfig, FilterConfig, Segmenter, TokenizerConfig};
pub use morpheme::{MorphemeAnalyzer, StageReport};

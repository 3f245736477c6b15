//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first stage of an analysis pipeline: they split input
//! text into tokens.
//!
//! # Available Tokenizers
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`unicode_word::UnicodeWordTokenizer`] - Uses Unicode word boundaries
//! - [`morpheme::MorphemeTokenizer`] - Attaches lexicon morphemes to the
//!   segments of another tokenizer and produces term text through the
//!   consumer gate
//!
//! # Examples
//!
//! ```
//! use termgate::analysis::tokenizer::Tokenizer;
//! use termgate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::session::StageContext;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so analyzers can be shared across
/// threads; the streams they produce stay on the thread that pulls them.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Tokenize as the first stage of a session's chain.
    ///
    /// Tokenizers that do not produce through the consumer gate ignore the
    /// stage context.
    fn tokenize_in_session(&self, text: &str, stage: StageContext) -> Result<TokenStream> {
        let _ = stage;
        self.tokenize(text)
    }

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual tokenizer modules
pub mod morpheme;
pub mod unicode_word;
pub mod whitespace;

// Re-export all tokenizers for convenient access
pub use morpheme::MorphemeTokenizer;
pub use unicode_word::UnicodeWordTokenizer;
pub use whitespace::WhitespaceTokenizer;

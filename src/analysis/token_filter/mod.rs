//! Token filter implementations for token transformation.
//!
//! # Available Filters
//!
//! - [`morpheme_field::MorphemeFieldFilter`] - Writes a morpheme form as the term
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`keyword_marker::KeywordMarkerFilter`] - Protects terms from rewriting
//! - [`part_of_speech_stop::PartOfSpeechStopFilter`] - Removes tokens by part of speech
//!
//! # Filters and the consumer gate
//!
//! Only filters that replace the term text of their input take part in the
//! consumer gate. Everything else ignores the stage context it is built with
//! and therefore never registers, which keeps the stage below it producing.

use crate::analysis::session::StageContext;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Apply this filter as a stage of a session's chain.
    fn filter_in_session(&self, tokens: TokenStream, stage: StageContext) -> Result<TokenStream> {
        let _ = stage;
        self.filter(tokens)
    }

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual filter modules
pub mod keyword_marker;
pub mod lowercase;
pub mod morpheme_field;
pub mod part_of_speech_stop;

// Re-export all filters for convenient access
pub use keyword_marker::KeywordMarkerFilter;
pub use lowercase::LowercaseFilter;
pub use morpheme_field::{MorphemeField, MorphemeFieldFilter};
pub use part_of_speech_stop::PartOfSpeechStopFilter;

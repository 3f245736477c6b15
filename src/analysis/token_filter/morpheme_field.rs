//! Morpheme field filter.
//!
//! Sets the term text of each token to one of the forms of its morpheme. When
//! built as a stage of a gated session, the filter takes the consumer slot
//! over from the stage it wraps, so that stage stops writing text which would
//! be replaced here anyway.
//!
//! To keep terms from being rewritten, put a
//! [`KeywordMarkerFilter`](super::keyword_marker::KeywordMarkerFilter) before
//! this filter: keyword tokens get their surface form.
//!
//! Tokens without a morpheme are passed through untouched.
//!
//! # Examples
//!
//! ```
//! use termgate::analysis::morpheme::Morpheme;
//! use termgate::analysis::token::Token;
//! use termgate::analysis::token_filter::Filter;
//! use termgate::analysis::token_filter::morpheme_field::MorphemeFieldFilter;
//!
//! let filter = MorphemeFieldFilter::dictionary_form();
//! let tokens = vec![Token::new("行っ", 0).with_morpheme(
//!     Morpheme::new("行っ").with_dictionary_form("行く"),
//! )];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//! assert_eq!(result[0].text, "行く");
//! ```

use log::warn;
use serde::{Deserialize, Serialize};

use crate::analysis::consumer::ConsumerGuard;
use crate::analysis::morpheme::Morpheme;
use crate::analysis::session::StageContext;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// The morpheme form a [`MorphemeFieldFilter`] writes as the term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphemeField {
    Surface,
    NormalizedForm,
    DictionaryForm,
    ReadingForm,
}

impl MorphemeField {
    /// The selected form, or `None` when the morpheme has no such form.
    pub fn value<'a>(&self, morpheme: &'a Morpheme) -> Option<&'a str> {
        let value = match self {
            MorphemeField::Surface => &morpheme.surface,
            MorphemeField::NormalizedForm => &morpheme.normalized_form,
            MorphemeField::DictionaryForm => &morpheme.dictionary_form,
            MorphemeField::ReadingForm => &morpheme.reading_form,
        };
        (!value.is_empty()).then_some(value.as_str())
    }

    pub fn name(&self) -> &'static str {
        match self {
            MorphemeField::Surface => "surface",
            MorphemeField::NormalizedForm => "normalized_form",
            MorphemeField::DictionaryForm => "dictionary_form",
            MorphemeField::ReadingForm => "reading_form",
        }
    }
}

/// A filter that writes a morpheme form into the term text.
#[derive(Clone, Debug)]
pub struct MorphemeFieldFilter {
    field: MorphemeField,
}

impl MorphemeFieldFilter {
    /// Create a filter writing `field`.
    pub fn new(field: MorphemeField) -> Self {
        MorphemeFieldFilter { field }
    }

    pub fn surface() -> Self {
        Self::new(MorphemeField::Surface)
    }

    pub fn normalized_form() -> Self {
        Self::new(MorphemeField::NormalizedForm)
    }

    pub fn dictionary_form() -> Self {
        Self::new(MorphemeField::DictionaryForm)
    }

    pub fn reading_form() -> Self {
        Self::new(MorphemeField::ReadingForm)
    }

    /// Get the form this filter writes.
    pub fn field(&self) -> MorphemeField {
        self.field
    }

    /// Compute the term for a token, or `None` if it has no morpheme.
    ///
    /// Keyword tokens and morphemes lacking the selected form fall back to
    /// the surface.
    pub fn term(&self, token: &Token) -> Option<String> {
        let morpheme = token.morpheme()?;
        let value = if token.is_keyword() {
            None
        } else {
            self.field.value(morpheme)
        };
        Some(value.unwrap_or(&morpheme.surface).to_string())
    }
}

impl Filter for MorphemeFieldFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        self.filter_in_session(tokens, StageContext::ungated())
    }

    fn filter_in_session(&self, tokens: TokenStream, stage: StageContext) -> Result<TokenStream> {
        Ok(Box::new(MorphemeFieldStream {
            _slot: stage.take_over(),
            filter: self.clone(),
            stage,
            input: tokens,
            started: false,
        }))
    }

    fn name(&self) -> &'static str {
        self.field.name()
    }
}

// `_slot` is declared first so it is released before the wrapped stream's own
// registration when the chain is dropped from the outside in.
struct MorphemeFieldStream {
    _slot: Option<ConsumerGuard>,
    filter: MorphemeFieldFilter,
    stage: StageContext,
    input: TokenStream,
    started: bool,
}

impl Iterator for MorphemeFieldStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if !self.started {
            self.started = true;
            if !self.stage.should_consume() {
                warn!(
                    "a {} filter is a no-op, it is not a filter which produces terms in one of your filter chains",
                    self.filter.field.name()
                );
            }
        }

        let mut token = self.input.next()?;
        if self.stage.should_consume()
            && let Some(term) = self.filter.term(&token)
        {
            token.text = term;
        }
        Some(token)
    }
}

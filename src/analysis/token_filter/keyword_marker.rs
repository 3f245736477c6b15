//! Keyword marker filter.
//!
//! Marks tokens whose term is in a keyword set, or matches a pattern, so that
//! later morpheme field filters keep their surface form.
//!
//! This filter reads term text but never replaces it, so it does not take the
//! consumer slot: the tokenizer below it keeps producing text for it to match.
//!
//! # Examples
//!
//! ```
//! use termgate::analysis::token::Token;
//! use termgate::analysis::token_filter::Filter;
//! use termgate::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
//!
//! let filter = KeywordMarkerFilter::from_words(["東京"]);
//! let tokens = vec![Token::new("東京", 0), Token::new("へ", 1)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//! assert!(result[0].is_keyword());
//! assert!(!result[1].is_keyword());
//! ```

use std::sync::Arc;

use ahash::AHashSet;
use regex::Regex;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that sets the keyword flag on matching tokens.
#[derive(Clone, Debug, Default)]
pub struct KeywordMarkerFilter {
    keywords: Arc<AHashSet<String>>,
    pattern: Option<Regex>,
}

impl KeywordMarkerFilter {
    /// Create a filter marking the given words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeywordMarkerFilter {
            keywords: Arc::new(words.into_iter().map(Into::into).collect()),
            pattern: None,
        }
    }

    /// Also mark every term fully matching `pattern`.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.pattern = Some(Regex::new(&format!("^(?:{pattern})$"))?);
        Ok(self)
    }

    /// Check whether `term` is a keyword.
    pub fn is_keyword(&self, term: &str) -> bool {
        self.keywords.contains(term) || self.pattern.as_ref().is_some_and(|p| p.is_match(term))
    }
}

impl Filter for KeywordMarkerFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let marker = self.clone();
        Ok(Box::new(tokens.map(move |token| {
            if !token.is_keyword() && marker.is_keyword(&token.text) {
                token.mark_keyword()
            } else {
                token
            }
        })))
    }

    fn name(&self) -> &'static str {
        "keyword_marker"
    }
}

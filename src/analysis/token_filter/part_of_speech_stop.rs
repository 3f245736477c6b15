//! Part-of-speech stop filter.
//!
//! Removes tokens whose morpheme part of speech starts with one of the
//! configured tag prefixes. A `"*"` matches any tag at its level. Tokens
//! without a morpheme are never stopped.
//!
//! # Examples
//!
//! ```
//! use termgate::analysis::morpheme::Morpheme;
//! use termgate::analysis::token::Token;
//! use termgate::analysis::token_filter::Filter;
//! use termgate::analysis::token_filter::part_of_speech_stop::PartOfSpeechStopFilter;
//!
//! let filter = PartOfSpeechStopFilter::new(vec![vec!["助詞".to_string()]]);
//! let tokens = vec![
//!     Token::new("東京", 0).with_morpheme(Morpheme::new("東京").with_part_of_speech(["名詞"])),
//!     Token::new("へ", 1).with_morpheme(Morpheme::new("へ").with_part_of_speech(["助詞", "格助詞"])),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "東京");
//! ```

use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that stops tokens by part of speech.
#[derive(Clone, Debug)]
pub struct PartOfSpeechStopFilter {
    /// Tag prefixes to stop
    stop_tags: Arc<Vec<Vec<String>>>,
    /// Whether to remove stopped tokens entirely or just mark them as stopped
    remove_stopped: bool,
}

impl PartOfSpeechStopFilter {
    /// Create a filter stopping every token matching one of `stop_tags`.
    pub fn new(stop_tags: Vec<Vec<String>>) -> Self {
        PartOfSpeechStopFilter {
            stop_tags: Arc::new(stop_tags),
            remove_stopped: true,
        }
    }

    /// Set whether to remove stopped tokens or only mark them.
    pub fn remove_stopped(mut self, remove: bool) -> Self {
        self.remove_stopped = remove;
        self
    }

    /// Check whether `token` matches one of the stop tags.
    pub fn is_stop_token(&self, token: &Token) -> bool {
        token.morpheme().is_some_and(|morpheme| {
            self.stop_tags
                .iter()
                .any(|prefix| morpheme.part_of_speech_starts_with(prefix))
        })
    }
}

impl Filter for PartOfSpeechStopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filter = self.clone();
        if self.remove_stopped {
            Ok(Box::new(
                tokens.filter(move |token| !filter.is_stop_token(token)),
            ))
        } else {
            Ok(Box::new(tokens.map(move |token| {
                if filter.is_stop_token(&token) {
                    token.stop()
                } else {
                    token
                }
            })))
        }
    }

    fn name(&self) -> &'static str {
        "part_of_speech_stop"
    }
}

//! Token types and utilities for text analysis.
//!
//! This module defines the core data structures for representing text tokens,
//! which are the fundamental units that flow through the analysis pipeline.
//!
//! # Core Types
//!
//! - [`Token`] - A single analyzed token with text, position, and morpheme
//! - [`TokenType`] - Script classification set by the segmenters
//! - [`TokenStream`] - Type alias for boxed iterator of tokens
//!
//! # Term text and morphemes
//!
//! A token produced by a morpheme tokenizer carries its [`Morpheme`]. Its
//! `text` is the term that gets indexed, and may be left empty by a stage that
//! was told by the consumer gate that a later stage writes the term instead.
//!
//! # Examples
//!
//! ```
//! use termgate::analysis::token::Token;
//!
//! let token = Token::with_offsets("world", 1, 6, 11);
//! assert_eq!(token.text, "world");
//! assert_eq!(token.start_offset, 6);
//! assert_eq!(token.end_offset, 11);
//! ```
//!
//! ```
//! use termgate::analysis::morpheme::Morpheme;
//! use termgate::analysis::token::Token;
//!
//! let token = Token::new("", 0)
//!     .with_morpheme(Morpheme::new("行っ").with_dictionary_form("行く"))
//!     .mark_keyword();
//!
//! assert!(token.is_keyword());
//! assert_eq!(token.morpheme().unwrap().dictionary_form, "行く");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::morpheme::Morpheme;

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The term text of the token
    pub text: String,

    /// The position of the token in the original token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Whether this token has been marked as stopped by a filter
    pub stopped: bool,

    /// Whether the term must be kept as its surface form
    pub keyword: bool,

    /// Script classification, if the segmenter detected one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,

    /// Morphological analysis of the token, if a morpheme tokenizer produced it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morpheme: Option<Morpheme>,
}

/// Script classification of a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Alphanum,
    Num,
    /// Contains at least one CJK ideograph
    Cjk,
    Katakana,
    Hiragana,
    Hangul,
    Punctuation,
    Other,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Script {
    Ideograph,
    Katakana,
    Hiragana,
    Hangul,
    Other,
}

fn script(c: char) -> Script {
    match c {
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{20000}'..='\u{2CEAF}' => {
            Script::Ideograph
        }
        '\u{30A0}'..='\u{30FF}' => Script::Katakana,
        '\u{3040}'..='\u{309F}' => Script::Hiragana,
        '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' => Script::Hangul,
        _ => Script::Other,
    }
}

impl TokenType {
    /// Classify a segment by the scripts it contains.
    ///
    /// Any ideograph makes the segment CJK; kana types require every char to
    /// be of that kana.
    pub fn detect(word: &str) -> TokenType {
        let only = |wanted: Script| word.chars().all(|c| script(c) == wanted);

        if word.is_empty() {
            TokenType::Other
        } else if word.chars().all(|c| c.is_ascii_digit()) {
            TokenType::Num
        } else if word.chars().any(|c| script(c) == Script::Ideograph) {
            TokenType::Cjk
        } else if only(Script::Katakana) {
            TokenType::Katakana
        } else if only(Script::Hiragana) {
            TokenType::Hiragana
        } else if word.chars().any(|c| script(c) == Script::Hangul) {
            TokenType::Hangul
        } else if word
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            TokenType::Alphanum
        } else if word.chars().all(|c| c.is_ascii_punctuation()) {
            TokenType::Punctuation
        } else {
            TokenType::Other
        }
    }
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token::with_offsets(text, position, 0, 0)
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            stopped: false,
            keyword: false,
            token_type: None,
            morpheme: None,
        }
    }

    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Mark the token so morpheme field filters keep its surface.
    pub fn mark_keyword(mut self) -> Self {
        self.keyword = true;
        self
    }

    pub fn is_keyword(&self) -> bool {
        self.keyword
    }

    pub fn with_morpheme(mut self, morpheme: Morpheme) -> Self {
        self.morpheme = Some(morpheme);
        self
    }

    pub fn morpheme(&self) -> Option<&Morpheme> {
        self.morpheme.as_ref()
    }

    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    pub fn token_type(&self) -> Option<TokenType> {
        self.token_type
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A lazily pulled sequence of tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!((token.start_offset, token.end_offset), (0, 0));
        assert!(!token.stopped);
        assert!(!token.keyword);
        assert!(token.morpheme.is_none());
        assert!(token.token_type().is_none());
        assert_eq!(token.to_string(), "hello");
    }

    #[test]
    fn test_token_flags() {
        let token = Token::new("test", 0).stop().mark_keyword();
        assert!(token.is_stopped());
        assert!(token.is_keyword());
    }

    #[test]
    fn test_token_type_detection() {
        assert_eq!(TokenType::detect("123"), TokenType::Num);
        assert_eq!(TokenType::detect("東京"), TokenType::Cjk);
        assert_eq!(TokenType::detect("行っ"), TokenType::Cjk);
        assert_eq!(TokenType::detect("カタカナ"), TokenType::Katakana);
        assert_eq!(TokenType::detect("ひらがな"), TokenType::Hiragana);
        assert_eq!(TokenType::detect("한국"), TokenType::Hangul);
        assert_eq!(TokenType::detect("hello"), TokenType::Alphanum);
        assert_eq!(TokenType::detect("!?"), TokenType::Punctuation);
        assert_eq!(TokenType::detect(""), TokenType::Other);

        let token = Token::new("abc", 0).with_token_type(TokenType::Alphanum);
        assert_eq!(token.token_type(), Some(TokenType::Alphanum));
    }

    #[test]
    fn test_token_serialization_skips_empty_parts() {
        let json = serde_json::to_value(Token::new("a", 0)).unwrap();
        assert!(json.get("morpheme").is_none());
        assert!(json.get("token_type").is_none());

        let token = Token::new("a", 0)
            .with_morpheme(Morpheme::new("a"))
            .with_token_type(TokenType::Alphanum);
        let json = serde_json::to_value(token).unwrap();
        assert_eq!(json["morpheme"]["surface"], "a");
        assert_eq!(json["token_type"], "alphanum");
    }
}

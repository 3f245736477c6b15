//! Lowercase filter implementation.
//!
//! # Examples
//!
//! ```
//! use termgate::analysis::token_filter::Filter;
//! use termgate::analysis::token_filter::lowercase::LowercaseFilter;
//! use termgate::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts tokens to lowercase.
///
/// Stopped tokens are passed through unchanged. Keyword tokens are lowercased
/// like any other; the keyword flag only protects against morpheme rewriting.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|mut token| {
            if !token.is_stopped() && token.text.chars().any(char::is_uppercase) {
                token.text = token.text.to_lowercase();
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_lowercase_filter() {
        let tokens = vec![
            Token::new("Ｔｏｋｙｏ", 0),
            Token::new("東京", 1),
            Token::new("Tower", 2).stop(),
            Token::new("ÉCOLE", 3).mark_keyword(),
        ];

        let result: Vec<Token> = LowercaseFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        let terms: Vec<&str> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(terms, vec!["ｔｏｋｙｏ", "東京", "Tower", "école"]);
        assert!(result[2].is_stopped());
        assert!(result[3].is_keyword());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseFilter::new().name(), "lowercase");
    }
}

//! Error types for termgate.
//!
//! All fallible operations in the crate return [`TermgateError`] through the
//! crate-wide [`Result`] alias. The consumer gate itself never fails; errors
//! come from configuration loading, lexicon parsing and I/O.
//!
//! # Examples
//!
//! ```
//! use termgate::error::{TermgateError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TermgateError::config("unknown segmenter"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for termgate operations.
#[derive(Error, Debug)]
pub enum TermgateError {
    /// I/O errors (config and lexicon files, stdin)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analyzer configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid keyword pattern
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with TermgateError.
pub type Result<T> = std::result::Result<T, TermgateError>;

impl TermgateError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TermgateError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TermgateError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

//! # termgate
//!
//! Consumer-gated morpheme analysis pipelines for full-text search.
//!
//! ## Features
//!
//! - Pull-based tokenizer → filter pipelines
//! - A consumer gate that lets a stage skip writing term text which a
//!   downstream filter would overwrite anyway
//! - Morpheme field filters (surface, normalized, dictionary and reading forms)
//! - JSON analyzer configuration and a small CLI

pub mod analysis;
pub mod cli;
pub mod error;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

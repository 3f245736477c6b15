//! Morpheme analyzer: a tokenizer and a chain of filters sharing one session.
//!
//! Every call to [`Analyzer::analyze`] is one analysis pass. It opens a fresh
//! [`AnalysisSession`], then builds the chain bottom-up, giving each stage a
//! [`StageContext`] whose upstream is the stage it wraps. Building happens
//! before the first token is pulled, so by the time the tokenizer produces,
//! every morpheme field filter has already taken its slot on the gate.
//!
//! ```text
//! morpheme → normalized_form → lowercase → reading_form
//!   [tok]       [norm]          [norm]       [norm, reading]
//! ```
//!
//! Above, `normalized_form` replaces the tokenizer's text, so the tokenizer
//! stops producing. `lowercase` does not take part, so `reading_form` cannot
//! drop `normalized_form` from the gate and both keep producing.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use termgate::analysis::analyzer::{Analyzer, MorphemeAnalyzer};
//! use termgate::analysis::lexicon::MorphemeLexicon;
//! use termgate::analysis::token_filter::morpheme_field::MorphemeFieldFilter;
//! use termgate::analysis::tokenizer::morpheme::MorphemeTokenizer;
//! use termgate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let lexicon = MorphemeLexicon::from_json_str(
//!     r#"[{"surface": "行っ", "dictionary_form": "行く"}]"#,
//! ).unwrap();
//! let tokenizer = MorphemeTokenizer::new(Arc::new(WhitespaceTokenizer::new()), Arc::new(lexicon));
//! let analyzer = MorphemeAnalyzer::new(Arc::new(tokenizer))
//!     .add_filter(Arc::new(MorphemeFieldFilter::dictionary_form()));
//!
//! let terms: Vec<_> = analyzer.analyze("東京 へ 行っ た").unwrap().map(|t| t.text).collect();
//! assert_eq!(terms, vec!["東京", "へ", "行く", "た"]);
//!
//! let stages = analyzer.describe_stages().unwrap();
//! assert!(!stages[0].consumer);
//! assert!(stages[1].consumer);
//! ```

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::session::{AnalysisSession, StageContext};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer whose stages coordinate through a consumer gate.
#[derive(Clone)]
pub struct MorphemeAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    consumer_gate: bool,
    name: String,
}

/// How one stage of a built chain stands on the consumer gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    /// Index in the chain, the tokenizer being 0
    pub position: usize,
    /// Tokenizer or filter name
    pub name: String,
    /// Whether the stage is a current consumer (always true without a gate)
    pub consumer: bool,
}

struct Chain {
    tokens: TokenStream,
    stages: Vec<(&'static str, StageContext)>,
}

impl MorphemeAnalyzer {
    /// Create a new analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        MorphemeAnalyzer {
            name: format!("morpheme_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
            consumer_gate: true,
        }
    }

    /// Add a filter to the end of the chain.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Enable or disable consumer gating for the passes of this analyzer.
    pub fn with_consumer_gate(mut self, enabled: bool) -> Self {
        self.consumer_gate = enabled;
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Get the configured name of this analyzer.
    pub fn analyzer_name(&self) -> &str {
        &self.name
    }

    /// Check whether passes of this analyzer use a consumer gate.
    pub fn consumer_gate(&self) -> bool {
        self.consumer_gate
    }

    /// Open the session for one pass.
    pub fn new_session(&self) -> AnalysisSession {
        if self.consumer_gate {
            AnalysisSession::with_consumer_gate()
        } else {
            AnalysisSession::new()
        }
    }

    /// Analyze `text` within a session owned by the caller.
    ///
    /// The session is not reset; resetting between passes is up to its owner.
    pub fn analyze_in(&self, text: &str, session: &AnalysisSession) -> Result<TokenStream> {
        Ok(self.build_chain(text, session)?.tokens)
    }

    /// Report which stages are current consumers once the chain is built.
    pub fn describe_stages(&self) -> Result<Vec<StageReport>> {
        let session = self.new_session();
        let chain = self.build_chain("", &session)?;
        let reports = chain
            .stages
            .iter()
            .enumerate()
            .map(|(position, (name, stage))| StageReport {
                position,
                name: name.to_string(),
                consumer: stage.should_consume(),
            })
            .collect();
        Ok(reports)
    }

    fn build_chain(&self, text: &str, session: &AnalysisSession) -> Result<Chain> {
        let mut stages = Vec::with_capacity(self.filters.len() + 1);

        let stage = session.stage(None);
        let mut upstream = stage.consumer();
        stages.push((self.tokenizer.name(), stage.clone()));
        let mut tokens = self.tokenizer.tokenize_in_session(text, stage)?;

        for filter in &self.filters {
            let stage = session.stage(Some(upstream));
            upstream = stage.consumer();
            stages.push((filter.name(), stage.clone()));
            tokens = filter.filter_in_session(tokens, stage)?;
        }

        if let Some(gate) = session.consumer_gate() {
            debug!(
                "built {} with {} stages, consumers: {:?}",
                self.name,
                stages.len(),
                gate.consumers()
            );
        }

        Ok(Chain { tokens, stages })
    }
}

impl Analyzer for MorphemeAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let session = self.new_session();
        self.analyze_in(text, &session)
    }

    fn name(&self) -> &'static str {
        "morpheme"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl std::fmt::Debug for MorphemeAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorphemeAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .field("consumer_gate", &self.consumer_gate)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lexicon::MorphemeLexicon;
    use crate::analysis::token::Token;
    use crate::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
    use crate::analysis::token_filter::lowercase::LowercaseFilter;
    use crate::analysis::token_filter::morpheme_field::MorphemeFieldFilter;
    use crate::analysis::tokenizer::morpheme::MorphemeTokenizer;
    use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;

    fn tokenizer() -> Arc<dyn Tokenizer> {
        let lexicon = MorphemeLexicon::from_json_str(
            r#"[
                {"surface": "行っ", "dictionary_form": "行く", "reading_form": "イッ"},
                {"surface": "Tokyo", "normalized_form": "TOKYO", "reading_form": "トウキョウ"}
            ]"#,
        )
        .unwrap();
        Arc::new(MorphemeTokenizer::new(
            Arc::new(WhitespaceTokenizer::new()),
            Arc::new(lexicon),
        ))
    }

    fn terms(analyzer: &MorphemeAnalyzer, text: &str) -> Vec<String> {
        analyzer.analyze(text).unwrap().map(|t| t.text).collect()
    }

    fn consumers(analyzer: &MorphemeAnalyzer) -> Vec<bool> {
        analyzer
            .describe_stages()
            .unwrap()
            .into_iter()
            .map(|s| s.consumer)
            .collect()
    }

    #[test]
    fn test_tokenizer_only() {
        let analyzer = MorphemeAnalyzer::new(tokenizer());
        assert_eq!(terms(&analyzer, "Tokyo へ 行っ"), vec!["Tokyo", "へ", "行っ"]);
        assert_eq!(consumers(&analyzer), vec![true]);
    }

    #[test]
    fn test_adjacent_field_filters_hand_off() {
        let analyzer = MorphemeAnalyzer::new(tokenizer())
            .add_filter(Arc::new(MorphemeFieldFilter::dictionary_form()))
            .add_filter(Arc::new(MorphemeFieldFilter::reading_form()));

        assert_eq!(terms(&analyzer, "行っ"), vec!["イッ"]);
        assert_eq!(consumers(&analyzer), vec![false, false, true]);
    }

    #[test]
    fn test_plain_filter_keeps_upstream_producing() {
        let analyzer = MorphemeAnalyzer::new(tokenizer())
            .add_filter(Arc::new(MorphemeFieldFilter::normalized_form()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(MorphemeFieldFilter::reading_form()));

        assert_eq!(consumers(&analyzer), vec![false, true, false, true]);
        assert_eq!(terms(&analyzer, "Tokyo"), vec!["トウキョウ"]);
    }

    #[test]
    fn test_keyword_marker_sees_tokenizer_text() {
        let analyzer = MorphemeAnalyzer::new(tokenizer())
            .add_filter(Arc::new(KeywordMarkerFilter::from_words(["Tokyo"])))
            .add_filter(Arc::new(MorphemeFieldFilter::reading_form()));

        assert_eq!(consumers(&analyzer), vec![true, false, true]);
        assert_eq!(terms(&analyzer, "Tokyo 行っ"), vec!["Tokyo", "イッ"]);
    }

    #[test]
    fn test_without_gate_everything_produces() {
        let analyzer = MorphemeAnalyzer::new(tokenizer())
            .add_filter(Arc::new(MorphemeFieldFilter::dictionary_form()))
            .with_consumer_gate(false);

        assert!(!analyzer.consumer_gate());
        assert_eq!(consumers(&analyzer), vec![true, true]);
        assert_eq!(terms(&analyzer, "行っ"), vec!["行く"]);
    }

    #[test]
    fn test_gate_is_balanced_after_pass() {
        let analyzer = MorphemeAnalyzer::new(tokenizer())
            .add_filter(Arc::new(MorphemeFieldFilter::dictionary_form()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(MorphemeFieldFilter::reading_form()));

        let session = AnalysisSession::with_consumer_gate();
        let stream = analyzer.analyze_in("行っ た", &session).unwrap();
        let gate = session.consumer_gate().unwrap();
        assert_eq!(gate.len(), 2);

        let tokens: Vec<Token> = stream.collect();
        assert_eq!(tokens.len(), 2);
        assert!(gate.is_empty());
    }

    #[test]
    fn test_session_without_gate() {
        let analyzer = MorphemeAnalyzer::new(tokenizer())
            .add_filter(Arc::new(MorphemeFieldFilter::dictionary_form()));

        let session = AnalysisSession::new();
        let tokens: Vec<Token> = analyzer.analyze_in("行っ", &session).unwrap().collect();
        assert_eq!(tokens[0].text, "行く");
    }

    #[test]
    fn test_analyzer_name() {
        let analyzer = MorphemeAnalyzer::new(tokenizer());
        assert_eq!(analyzer.analyzer_name(), "morpheme_morpheme");
        assert_eq!(analyzer.name(), "morpheme");

        let analyzer = analyzer.with_name("ja_search");
        assert_eq!(analyzer.analyzer_name(), "ja_search");
        assert!(format!("{analyzer:?}").contains("ja_search"));
    }
}

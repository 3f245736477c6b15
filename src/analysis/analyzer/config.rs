//! JSON configuration for morpheme analyzers.
//!
//! ```json
//! {
//!   "name": "ja_search",
//!   "tokenizer": {
//!     "segmenter": "whitespace",
//!     "lexicon_path": "lexicon.json",
//!     "lexicon": [{ "surface": "行っ", "dictionary_form": "行く" }]
//!   },
//!   "filters": [
//!     { "type": "keyword_marker", "keywords": ["東京"] },
//!     { "type": "part_of_speech_stop", "tags": [["助詞"]] },
//!     { "type": "dictionary_form" },
//!     { "type": "lowercase" }
//!   ],
//!   "consumer_gate": true
//! }
//! ```
//!
//! Inline lexicon entries are applied on top of the ones loaded from
//! `lexicon_path`. A relative `lexicon_path` is resolved against the directory
//! of the configuration file when loaded with [`AnalyzerConfig::from_file`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::morpheme::MorphemeAnalyzer;
use crate::analysis::lexicon::{LexiconEntry, MorphemeLexicon};
use crate::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::morpheme_field::{MorphemeField, MorphemeFieldFilter};
use crate::analysis::token_filter::part_of_speech_stop::PartOfSpeechStopFilter;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::morpheme::MorphemeTokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::{Result, TermgateError};

/// Configuration of a [`MorphemeAnalyzer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub tokenizer: TokenizerConfig,

    #[serde(default)]
    pub filters: Vec<FilterConfig>,

    /// Whether stages coordinate term production through a consumer gate
    #[serde(default = "default_consumer_gate")]
    pub consumer_gate: bool,
}

/// Configuration of the morpheme tokenizer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    #[serde(default)]
    pub segmenter: Segmenter,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lexicon: Vec<LexiconEntry>,
}

/// How text is split before lexicon lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segmenter {
    #[default]
    Whitespace,
    UnicodeWord,
}

/// One filter of the chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterConfig {
    Surface,
    NormalizedForm,
    DictionaryForm,
    ReadingForm,
    Lowercase,
    KeywordMarker {
        #[serde(default)]
        keywords: Vec<String>,
        #[serde(default)]
        pattern: Option<String>,
    },
    PartOfSpeechStop {
        tags: Vec<Vec<String>>,
        #[serde(default = "default_remove")]
        remove: bool,
    },
}

fn default_name() -> String {
    "default".to_string()
}

fn default_consumer_gate() -> bool {
    true
}

fn default_remove() -> bool {
    true
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            name: default_name(),
            tokenizer: TokenizerConfig::default(),
            filters: Vec::new(),
            consumer_gate: default_consumer_gate(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AnalyzerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = AnalyzerConfig::from_json_str(&fs::read_to_string(path)?)?;
        if let Some(lexicon_path) = &config.tokenizer.lexicon_path
            && lexicon_path.is_relative()
            && let Some(dir) = path.parent()
        {
            config.tokenizer.lexicon_path = Some(dir.join(lexicon_path));
        }
        debug!("loaded analyzer config {} from {}", config.name, path.display());
        Ok(config)
    }

    /// Check the configuration for values that cannot build an analyzer.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TermgateError::config("analyzer name must not be empty"));
        }
        for (index, filter) in self.filters.iter().enumerate() {
            match filter {
                FilterConfig::KeywordMarker { keywords, pattern }
                    if keywords.is_empty() && pattern.is_none() =>
                {
                    return Err(TermgateError::config(format!(
                        "filter {index}: keyword_marker needs keywords or a pattern"
                    )));
                }
                FilterConfig::PartOfSpeechStop { tags, .. } if tags.is_empty() => {
                    return Err(TermgateError::config(format!(
                        "filter {index}: part_of_speech_stop needs at least one tag"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Build the analyzer.
    pub fn build(&self) -> Result<MorphemeAnalyzer> {
        self.validate()?;

        let mut analyzer = MorphemeAnalyzer::new(Arc::new(self.tokenizer.build()?))
            .with_name(self.name.clone())
            .with_consumer_gate(self.consumer_gate);
        for filter in &self.filters {
            analyzer = analyzer.add_filter(filter.build()?);
        }
        Ok(analyzer)
    }
}

impl TokenizerConfig {
    /// Build the morpheme tokenizer, loading the lexicon file if configured.
    pub fn build(&self) -> Result<MorphemeTokenizer> {
        let mut lexicon = match &self.lexicon_path {
            Some(path) => MorphemeLexicon::from_file(path)?,
            None => MorphemeLexicon::new(),
        };
        lexicon.extend(self.lexicon.iter().cloned());

        let segmenter: Arc<dyn Tokenizer> = match self.segmenter {
            Segmenter::Whitespace => Arc::new(WhitespaceTokenizer::new()),
            Segmenter::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
        };
        Ok(MorphemeTokenizer::new(segmenter, Arc::new(lexicon)))
    }
}

impl FilterConfig {
    /// Build the configured filter.
    pub fn build(&self) -> Result<Arc<dyn Filter>> {
        let field = |form| -> Arc<dyn Filter> { Arc::new(MorphemeFieldFilter::new(form)) };
        Ok(match self {
            FilterConfig::Surface => field(MorphemeField::Surface),
            FilterConfig::NormalizedForm => field(MorphemeField::NormalizedForm),
            FilterConfig::DictionaryForm => field(MorphemeField::DictionaryForm),
            FilterConfig::ReadingForm => field(MorphemeField::ReadingForm),
            FilterConfig::Lowercase => Arc::new(LowercaseFilter::new()),
            FilterConfig::KeywordMarker { keywords, pattern } => {
                let mut filter = KeywordMarkerFilter::from_words(keywords.iter().cloned());
                if let Some(pattern) = pattern {
                    filter = filter.with_pattern(pattern)?;
                }
                Arc::new(filter)
            }
            FilterConfig::PartOfSpeechStop { tags, remove } => {
                Arc::new(PartOfSpeechStopFilter::new(tags.clone()).remove_stopped(*remove))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;
    use crate::analysis::analyzer::Analyzer;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.tokenizer.segmenter, Segmenter::Whitespace);
        assert!(config.consumer_gate);
    }

    #[test]
    fn test_parse_filters() {
        let config = AnalyzerConfig::from_json_str(
            r#"{
                "filters": [
                    {"type": "keyword_marker", "pattern": "[0-9]+"},
                    {"type": "part_of_speech_stop", "tags": [["助詞"]]},
                    {"type": "normalized_form"},
                    {"type": "lowercase"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.filters.len(), 4);
        assert_eq!(
            config.filters[1],
            FilterConfig::PartOfSpeechStop {
                tags: vec![vec!["助詞".to_string()]],
                remove: true
            }
        );
        assert_eq!(config.filters[2], FilterConfig::NormalizedForm);
    }

    #[test]
    fn test_validation_errors() {
        assert!(AnalyzerConfig::from_json_str(r#"{"name": " "}"#).is_err());
        assert!(AnalyzerConfig::from_json_str(r#"{"filters": [{"type": "keyword_marker"}]}"#).is_err());
        assert!(
            AnalyzerConfig::from_json_str(r#"{"filters": [{"type": "part_of_speech_stop", "tags": []}]}"#)
                .is_err()
        );
        assert!(AnalyzerConfig::from_json_str(r#"{"filters": [{"type": "stem"}]}"#).is_err());
    }

    #[test]
    fn test_invalid_pattern_fails_build() {
        let config = AnalyzerConfig::from_json_str(
            r#"{"filters": [{"type": "keyword_marker", "pattern": "("}]}"#,
        )
        .unwrap();
        assert!(matches!(config.build(), Err(TermgateError::Regex(_))));
    }

    #[test]
    fn test_build_and_analyze() {
        let config = AnalyzerConfig::from_json_str(
            r#"{
                "name": "ja",
                "tokenizer": {"lexicon": [{"surface": "行っ", "dictionary_form": "行く"}]},
                "filters": [{"type": "dictionary_form"}]
            }"#,
        )
        .unwrap();
        let analyzer = config.build().unwrap();
        assert_eq!(analyzer.analyzer_name(), "ja");

        let terms: Vec<String> = analyzer.analyze("行っ た").unwrap().map(|t| t.text).collect();
        assert_eq!(terms, vec!["行く", "た"]);
    }

    #[test]
    fn test_from_file_resolves_relative_lexicon() {
        let dir = TempDir::new().unwrap();
        let mut lexicon = fs::File::create(dir.path().join("lexicon.json")).unwrap();
        lexicon
            .write_all(br#"[{"surface": "a", "reading_form": "x"}, {"surface": "b", "reading_form": "y"}]"#)
            .unwrap();

        let config_path = dir.path().join("analyzer.json");
        fs::write(
            &config_path,
            r#"{
                "tokenizer": {
                    "lexicon_path": "lexicon.json",
                    "lexicon": [{"surface": "b", "reading_form": "z"}]
                },
                "filters": [{"type": "reading_form"}]
            }"#,
        )
        .unwrap();

        let config = AnalyzerConfig::from_file(&config_path).unwrap();
        assert_eq!(
            config.tokenizer.lexicon_path.as_deref(),
            Some(dir.path().join("lexicon.json").as_path())
        );

        let analyzer = config.build().unwrap();
        let terms: Vec<String> = analyzer.analyze("a b c").unwrap().map(|t| t.text).collect();
        assert_eq!(terms, vec!["x", "z", "c"]);
    }

    #[test]
    fn test_missing_lexicon_file() {
        let config = AnalyzerConfig {
            tokenizer: TokenizerConfig {
                lexicon_path: Some(PathBuf::from("/nonexistent/lexicon.json")),
                ..TokenizerConfig::default()
            },
            ..AnalyzerConfig::default()
        };
        assert!(matches!(config.build(), Err(TermgateError::Io(_))));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = AnalyzerConfig {
            filters: vec![FilterConfig::ReadingForm, FilterConfig::Lowercase],
            consumer_gate: false,
            ..AnalyzerConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AnalyzerConfig::from_json_str(&json).unwrap(), config);
    }
}

//! Morpheme tokenizer.
//!
//! Splits text with a segmenter, resolves every segment against a
//! [`MorphemeLexicon`] and attaches the resulting [`Morpheme`] to the token.
//!
//! This is the leaf producer of a gated chain. It registers itself on the
//! session's consumer gate for as long as its stream lives, and writes the
//! surface into `Token::text` only while it is a current consumer. When a
//! morpheme field filter directly downstream has taken the slot over, the text
//! is left empty and the filter writes the term instead.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use termgate::analysis::lexicon::MorphemeLexicon;
//! use termgate::analysis::tokenizer::Tokenizer;
//! use termgate::analysis::tokenizer::morpheme::MorphemeTokenizer;
//! use termgate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let lexicon = MorphemeLexicon::from_json_str(
//!     r#"[{"surface": "行く", "reading_form": "イク"}]"#,
//! ).unwrap();
//! let tokenizer = MorphemeTokenizer::new(Arc::new(WhitespaceTokenizer::new()), Arc::new(lexicon));
//!
//! let tokens: Vec<_> = tokenizer.tokenize("東京 へ 行く").unwrap().collect();
//! assert_eq!(tokens[2].text, "行く");
//! assert_eq!(tokens[2].morpheme().unwrap().reading_form, "イク");
//! ```

use std::mem;
use std::sync::Arc;

use crate::analysis::consumer::ConsumerGuard;
use crate::analysis::lexicon::MorphemeLexicon;
use crate::analysis::morpheme::Morpheme;
use crate::analysis::session::StageContext;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that produces morpheme-carrying tokens.
#[derive(Clone)]
pub struct MorphemeTokenizer {
    segmenter: Arc<dyn Tokenizer>,
    lexicon: Arc<MorphemeLexicon>,
}

impl MorphemeTokenizer {
    /// Create a morpheme tokenizer over `segmenter` and `lexicon`.
    pub fn new(segmenter: Arc<dyn Tokenizer>, lexicon: Arc<MorphemeLexicon>) -> Self {
        MorphemeTokenizer { segmenter, lexicon }
    }

    /// Get the segmenter used to split text.
    pub fn segmenter(&self) -> &Arc<dyn Tokenizer> {
        &self.segmenter
    }

    /// Get the lexicon used to resolve segments.
    pub fn lexicon(&self) -> &Arc<MorphemeLexicon> {
        &self.lexicon
    }
}

impl Tokenizer for MorphemeTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        self.tokenize_in_session(text, StageContext::ungated())
    }

    fn tokenize_in_session(&self, text: &str, stage: StageContext) -> Result<TokenStream> {
        let segments = self.segmenter.tokenize(text)?;
        Ok(Box::new(MorphemeTokenStream {
            _registration: stage.register(),
            stage,
            segments,
            lexicon: Arc::clone(&self.lexicon),
        }))
    }

    fn name(&self) -> &'static str {
        "morpheme"
    }
}

impl std::fmt::Debug for MorphemeTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorphemeTokenizer")
            .field("segmenter", &self.segmenter.name())
            .field("lexicon_entries", &self.lexicon.len())
            .finish()
    }
}

struct MorphemeTokenStream {
    _registration: Option<ConsumerGuard>,
    stage: StageContext,
    segments: TokenStream,
    lexicon: Arc<MorphemeLexicon>,
}

impl MorphemeTokenStream {
    fn resolve(&self, surface: String) -> Morpheme {
        self.lexicon.lookup(surface)
    }
}

impl Iterator for MorphemeTokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let mut token = self.segments.next()?;
        let morpheme = self.resolve(mem::take(&mut token.text));
        if self.stage.should_consume() {
            token.text.push_str(&morpheme.surface);
        }
        Some(token.with_morpheme(morpheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lexicon::UNKNOWN_PART_OF_SPEECH;
    use crate::analysis::session::AnalysisSession;
    use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
    use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;

    fn tokenizer() -> MorphemeTokenizer {
        let lexicon = MorphemeLexicon::from_json_str(
            r#"[{"surface": "行っ", "dictionary_form": "行く", "part_of_speech": ["動詞"]}]"#,
        )
        .unwrap();
        MorphemeTokenizer::new(Arc::new(WhitespaceTokenizer::new()), Arc::new(lexicon))
    }

    #[test]
    fn test_ungated_tokenize_writes_surface() {
        let tokens: Vec<Token> = tokenizer().tokenize("東京 へ 行っ た").unwrap().collect();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[2].text, "行っ");
        assert_eq!(tokens[2].morpheme().unwrap().dictionary_form, "行く");
        assert_eq!(
            tokens[0].morpheme().unwrap().part_of_speech,
            vec![UNKNOWN_PART_OF_SPEECH]
        );
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (7, 10));
    }

    #[test]
    fn test_registered_tokenizer_writes_surface() {
        let session = AnalysisSession::with_consumer_gate();
        let stage = session.stage(None);
        let consumer = stage.consumer();

        let stream = tokenizer().tokenize_in_session("東京 へ", stage).unwrap();
        let gate = session.consumer_gate().unwrap();
        assert_eq!(gate.consumers(), vec![consumer]);

        let tokens: Vec<Token> = stream.collect();
        assert_eq!(tokens[0].text, "東京");
        // collect() consumed and dropped the stream, releasing the registration
        assert!(gate.is_empty());
    }

    #[test]
    fn test_superseded_tokenizer_skips_text() {
        let session = AnalysisSession::with_consumer_gate();
        let stage = session.stage(None);
        let consumer = stage.consumer();

        let stream = tokenizer().tokenize_in_session("東京 へ", stage).unwrap();
        let downstream = session.stage(Some(consumer));
        let _slot = downstream.take_over();

        let tokens: Vec<Token> = stream.collect();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.text.is_empty()));
        assert_eq!(tokens[0].morpheme().unwrap().surface, "東京");
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn test_with_unicode_word_segmenter() {
        let tokenizer = MorphemeTokenizer::new(
            Arc::new(UnicodeWordTokenizer::new()),
            Arc::new(MorphemeLexicon::new()),
        );
        let tokens: Vec<Token> = tokenizer.tokenize("hello, world").unwrap().collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].morpheme().unwrap().surface, "world");
        assert_eq!(tokenizer.name(), "morpheme");
        assert_eq!(tokenizer.segmenter().name(), "unicode_word");
    }
}

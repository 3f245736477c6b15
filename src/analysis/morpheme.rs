//! Morphemes attached to tokens.
//!
//! A [`Morpheme`] carries the forms a morpheme field filter can turn into a
//! term. It serializes with the camelCase keys used by analysis explain output:
//!
//! ```
//! use termgate::analysis::morpheme::Morpheme;
//!
//! let m = Morpheme::new("行っ")
//!     .with_dictionary_form("行く")
//!     .with_reading_form("イッ")
//!     .with_part_of_speech(["動詞", "非自立可能"]);
//!
//! let json = serde_json::to_value(&m).unwrap();
//! assert_eq!(json["dictionaryForm"], "行く");
//! assert_eq!(json["normalizedForm"], "行っ");
//! assert_eq!(json["partOfSpeech"][0], "動詞");
//! ```

use serde::{Deserialize, Serialize};

/// The analyzed forms of one morpheme.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Morpheme {
    /// Text as it appears in the input
    pub surface: String,
    /// Lemma
    pub dictionary_form: String,
    /// Spelling-normalized form
    pub normalized_form: String,
    /// Reading (pronunciation) form
    pub reading_form: String,
    /// Part-of-speech tags, most general first
    #[serde(default)]
    pub part_of_speech: Vec<String>,
}

impl Morpheme {
    /// Create a morpheme whose every form equals `surface`.
    pub fn new<S: Into<String>>(surface: S) -> Self {
        let surface = surface.into();
        Morpheme {
            dictionary_form: surface.clone(),
            normalized_form: surface.clone(),
            reading_form: surface.clone(),
            surface,
            part_of_speech: Vec::new(),
        }
    }

    pub fn with_dictionary_form<S: Into<String>>(mut self, form: S) -> Self {
        self.dictionary_form = form.into();
        self
    }

    pub fn with_normalized_form<S: Into<String>>(mut self, form: S) -> Self {
        self.normalized_form = form.into();
        self
    }

    pub fn with_reading_form<S: Into<String>>(mut self, form: S) -> Self {
        self.reading_form = form.into();
        self
    }

    pub fn with_part_of_speech<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.part_of_speech = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether the part of speech starts with `prefix`.
    ///
    /// A `"*"` in the prefix matches any tag at that level.
    pub fn part_of_speech_starts_with(&self, prefix: &[String]) -> bool {
        prefix.len() <= self.part_of_speech.len()
            && prefix
                .iter()
                .zip(&self.part_of_speech)
                .all(|(want, have)| want == "*" || want == have)
    }
}

//! Surface → morpheme lookup table.
//!
//! The lexicon is what lets a plain segmenter act as a morpheme tokenizer. It
//! is a flat table loaded from JSON:
//!
//! ```json
//! [
//!   { "surface": "行っ", "dictionary_form": "行く", "part_of_speech": ["動詞"] },
//!   { "surface": "へ", "part_of_speech": ["助詞", "格助詞"] }
//! ]
//! ```
//!
//! Omitted forms default to the surface. Unknown surfaces resolve to an
//! identity morpheme tagged [`UNKNOWN_PART_OF_SPEECH`].

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::morpheme::Morpheme;
use crate::error::Result;

/// Part of speech given to surfaces missing from the lexicon.
pub const UNKNOWN_PART_OF_SPEECH: &str = "unknown";

/// One lexicon row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub surface: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary_form: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_form: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_form: Option<String>,
    #[serde(default)]
    pub part_of_speech: Vec<String>,
}

impl LexiconEntry {
    fn to_morpheme(&self) -> Morpheme {
        let mut morpheme = Morpheme::new(self.surface.as_str())
            .with_part_of_speech(self.part_of_speech.iter().cloned());
        if let Some(form) = &self.dictionary_form {
            morpheme.dictionary_form = form.clone();
        }
        if let Some(form) = &self.normalized_form {
            morpheme.normalized_form = form.clone();
        }
        if let Some(form) = &self.reading_form {
            morpheme.reading_form = form.clone();
        }
        morpheme
    }
}

/// Surface-keyed morpheme table.
#[derive(Clone, Debug, Default)]
pub struct MorphemeLexicon {
    entries: AHashMap<String, Morpheme>,
}

impl MorphemeLexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        MorphemeLexicon::default()
    }

    /// Build a lexicon from entries. Later entries override earlier ones.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        let mut lexicon = MorphemeLexicon::new();
        lexicon.extend(entries);
        lexicon
    }

    /// Parse a JSON array of entries.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<LexiconEntry> = serde_json::from_str(json)?;
        Ok(MorphemeLexicon::from_entries(entries))
    }

    /// Load a JSON array of entries from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let lexicon = MorphemeLexicon::from_json_str(&fs::read_to_string(path)?)?;
        debug!("loaded {} lexicon entries from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Add entries, overriding existing surfaces.
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        for entry in entries {
            self.entries.insert(entry.surface.clone(), entry.to_morpheme());
        }
    }

    /// Add another lexicon's entries on top of this one.
    pub fn merge(&mut self, other: MorphemeLexicon) {
        self.entries.extend(other.entries);
    }

    /// Get the entry for `surface`, if there is one.
    pub fn get(&self, surface: &str) -> Option<&Morpheme> {
        self.entries.get(surface)
    }

    /// Resolve `surface` to a morpheme, falling back to an unknown word.
    pub fn lookup(&self, surface: String) -> Morpheme {
        match self.entries.get(&surface) {
            Some(morpheme) => morpheme.clone(),
            None => Morpheme::new(surface).with_part_of_speech([UNKNOWN_PART_OF_SPEECH]),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

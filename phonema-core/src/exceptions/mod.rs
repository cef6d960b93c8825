//! Exception dictionary: words whose transcription is listed, not derived.
//!
//! ## File format
//!
//! UTF-8 text, one entry per non-blank line:
//!
//! ```text
//! word PHONEME1 PHONEME2 ...
//! ```
//!
//! The word is lowercased and may contain `-` and `+`; phonemes are
//! uppercased. Loading is all-or-nothing: a malformed line, a duplicate key
//! or an empty file fails the whole load.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{PhonemaError, Result};
use crate::letters::{is_letter, STRESS_MARK};
use crate::transcript::{PhonemeToken, Transcription};

const BUILTIN_SOURCE: &str = "<builtin>";
const BUILTIN: &str = include_str!("../../data/exceptions.txt");

/// Immutable word → transcription map.
#[derive(Debug, Clone)]
pub struct ExceptionDictionary {
    entries: HashMap<String, Transcription>,
}

impl ExceptionDictionary {
    /// Load a dictionary file from disk.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `Load` for a malformed line or
    /// duplicate key, `EmptyDictionary` if no entries were found.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let dictionary = Self::parse(&path.display().to_string(), &raw)?;
        info!(
            "loaded {} exception entries from {:?}",
            dictionary.len(),
            path
        );
        Ok(dictionary)
    }

    /// The dictionary shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_SOURCE, BUILTIN)
    }

    /// Parse dictionary text. `source_name` is only used in error messages.
    pub fn parse(source_name: &str, text: &str) -> Result<Self> {
        let mut entries: HashMap<String, Transcription> = HashMap::new();
        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            let malformed = |reason: &str| PhonemaError::Load {
                source_name: source_name.to_string(),
                line: line_number,
                reason: reason.to_string(),
            };
            if fields.len() < 2 {
                return Err(malformed("an entry needs a word and at least one phoneme"));
            }
            let word = fields[0].to_lowercase();
            if !word
                .chars()
                .any(|c| is_letter(c) || c == '-' || c == STRESS_MARK)
            {
                return Err(malformed("the word contains no Russian letters"));
            }
            if entries.contains_key(&word) {
                return Err(malformed("duplicate word"));
            }
            let phonemes: Vec<PhonemeToken> = fields[1..]
                .iter()
                .map(|p| PhonemeToken::new(p.to_uppercase()))
                .collect();
            entries.insert(word, Transcription::from(phonemes));
        }
        if entries.is_empty() {
            return Err(PhonemaError::EmptyDictionary {
                source_name: source_name.to_string(),
            });
        }
        Ok(Self { entries })
    }

    /// Stored transcription for `word`, compared in lowercase.
    pub fn lookup(&self, word: &str) -> Option<&Transcription> {
        match self.entries.get(word) {
            Some(found) => Some(found),
            None => self.entries.get(&word.to_lowercase()),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

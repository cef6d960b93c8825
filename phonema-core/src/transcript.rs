//! Output types: phoneme tokens, transcriptions and per-call diagnostics.
//!
//! All types derive `serde::Serialize` + `serde::Deserialize` so hosts can
//! emit them as JSON without wrapper types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The literal silence marker, accepted in phrases and emitted as a token.
pub const SILENCE: &str = "sil";

/// Trailing marker of a soft phoneme (`N0`).
pub const SOFTNESS_MARK: char = '0';

/// Trailing marker of a geminate phoneme (`N0l`).
pub const GEMINATION_MARK: char = 'l';

/// One phoneme symbol, optionally carrying the gemination marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhonemeToken(String);

impl PhonemeToken {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn silence() -> Self {
        Self(SILENCE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Symbol with trailing softness and gemination markers removed.
    pub fn base(&self) -> &str {
        self.0
            .trim_end_matches(|c| c == SOFTNESS_MARK || c == GEMINATION_MARK)
    }

    pub fn is_geminate(&self) -> bool {
        self.0.ends_with(GEMINATION_MARK)
    }

    pub fn is_silence(&self) -> bool {
        self.0 == SILENCE
    }

    /// This token with the gemination marker appended.
    pub fn geminate(&self) -> Self {
        let mut symbol = self.0.clone();
        symbol.push(GEMINATION_MARK);
        Self(symbol)
    }
}

impl fmt::Display for PhonemeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PhonemeToken {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

/// Ordered phoneme sequence for a word or phrase.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcription(Vec<PhonemeToken>);

impl Transcription {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The one-token transcription of a pause.
    pub fn silence() -> Self {
        Self(vec![PhonemeToken::silence()])
    }

    pub fn is_silence(&self) -> bool {
        self.0.len() == 1 && self.0[0].is_silence()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhonemeToken> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[PhonemeToken] {
        &self.0
    }

    /// Symbols as string slices, mostly for comparisons.
    pub fn as_strs(&self) -> Vec<&str> {
        self.0.iter().map(PhonemeToken::as_str).collect()
    }
}

impl fmt::Display for Transcription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token.as_str())?;
        }
        Ok(())
    }
}

impl From<Vec<PhonemeToken>> for Transcription {
    fn from(tokens: Vec<PhonemeToken>) -> Self {
        Self(tokens)
    }
}

impl FromIterator<PhonemeToken> for Transcription {
    fn from_iter<I: IntoIterator<Item = PhonemeToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Transcription {
    type Item = &'a PhonemeToken;
    type IntoIter = std::slice::Iter<'a, PhonemeToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Non-fatal findings reported alongside a transcription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A word with several vowels and no stress mark; unstressed rules were used.
    AmbiguousStress { word: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousStress { word } => {
                write!(f, "`{word}`: the accent for this word is unknown")
            }
        }
    }
}

/// Result of a successful engine call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcribed {
    pub phonemes: Transcription,
    pub diagnostics: Vec<Diagnostic>,
}

impl Transcribed {
    pub fn has_ambiguous_stress(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::AmbiguousStress { .. }))
    }
}

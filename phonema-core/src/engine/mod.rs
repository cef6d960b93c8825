//! `PhonemaEngine`: the public entry point.
//!
//! ## Lifecycle
//!
//! ```text
//! PhonemaEngine::from_config()
//!     └─► exception dictionary loaded, realization table attached
//!         └─► word_to_phonemes() / phrase_to_phonemes()   (any thread, any number)
//! ```
//!
//! ## Threading
//!
//! The engine holds only immutable data behind `Arc`s, so it is `Send + Sync`
//! and cheap to clone. Calls never block and never mutate shared state.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::Result,
    exceptions::ExceptionDictionary,
    letters::ALPHABET,
    phrase,
    table::{RealizationTable, TableHandle},
    transcript::{Diagnostic, Transcribed, SILENCE},
    transducer::{self, rules::RULE_PHONEMES},
};

/// Configuration for `PhonemaEngine`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct EngineConfig {
    /// Exception dictionary file. `None` uses the dictionary built into the crate.
    pub exceptions_path: Option<PathBuf>,
    /// Whether words with several vowels and no stress mark produce a
    /// `Diagnostic::AmbiguousStress`. Default: `true`.
    pub report_ambiguous_stress: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exceptions_path: None,
            report_ambiguous_stress: true,
        }
    }
}

/// Grapheme-to-phoneme engine for Russian.
#[derive(Debug, Clone)]
pub struct PhonemaEngine {
    config: EngineConfig,
    table: TableHandle,
    exceptions: Arc<ExceptionDictionary>,
}

impl PhonemaEngine {
    /// Assemble an engine from already-loaded parts.
    pub fn new(config: EngineConfig, table: TableHandle, exceptions: ExceptionDictionary) -> Self {
        Self {
            config,
            table,
            exceptions: Arc::new(exceptions),
        }
    }

    /// Build an engine with the standard table and the dictionary named by
    /// `config.exceptions_path` (or the built-in one).
    ///
    /// # Errors
    /// Any dictionary load failure; the engine is never built from a
    /// partially loaded dictionary.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let exceptions = match &config.exceptions_path {
            Some(path) => ExceptionDictionary::load(path)?,
            None => ExceptionDictionary::builtin()?,
        };
        info!("engine ready with {} exception entries", exceptions.len());
        Ok(Self::new(config, TableHandle::default(), exceptions))
    }

    /// Default configuration: standard table, built-in dictionary.
    pub fn builtin() -> Result<Self> {
        Self::from_config(EngineConfig::default())
    }

    /// Transcribe a single word.
    ///
    /// The word may carry stress marks (`+` or U+0301 after the vowel) and
    /// hyphens. Hyphenated compounds are handed to the phrase composer.
    ///
    /// # Errors
    /// `InvalidInput` for malformed words; `TranscriptionEmpty` or
    /// `InvariantViolation` for gaps in rule coverage.
    pub fn word_to_phonemes(&self, word: &str) -> Result<Transcribed> {
        let mut diagnostics = Vec::new();
        let phonemes = transducer::transcribe_word(self, word, &mut diagnostics)?;
        Ok(Transcribed {
            phonemes,
            diagnostics: dedup(diagnostics),
        })
    }

    /// Transcribe a whitespace-separated phrase, which may contain `sil`.
    ///
    /// # Errors
    /// As for [`word_to_phonemes`](Self::word_to_phonemes), plus
    /// `InvalidInput` for a proclitic without a host or a dangling enclitic.
    pub fn phrase_to_phonemes(&self, phrase: &str) -> Result<Transcribed> {
        let mut diagnostics = Vec::new();
        let phonemes = phrase::compose(self, phrase, &mut diagnostics)?;
        Ok(Transcribed {
            phonemes,
            diagnostics: dedup(diagnostics),
        })
    }

    /// The 33 Russian letters, in code point order.
    pub fn letters(&self) -> &'static [char] {
        &ALPHABET
    }

    /// Every phoneme the engine can emit, sorted.
    pub fn phonemes(&self) -> Vec<&str> {
        let mut all = self.table.0.phonemes();
        all.extend(RULE_PHONEMES);
        all.sort_unstable();
        all.dedup();
        all
    }

    /// The silence marker accepted in phrases and emitted as a token.
    pub fn silence_name(&self) -> &'static str {
        SILENCE
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn exceptions(&self) -> &ExceptionDictionary {
        &self.exceptions
    }

    pub(crate) fn table(&self) -> &dyn RealizationTable {
        self.table.0.as_ref()
    }
}

/// Drop repeated diagnostics, keeping first occurrences in order.
fn dedup(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let mut out: Vec<Diagnostic> = Vec::with_capacity(diagnostics.len());
    for d in diagnostics {
        if !out.contains(&d) {
            out.push(d);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PhonemaEngine>();
    }

    #[test]
    fn builtin_engine_builds() {
        let engine = PhonemaEngine::builtin().unwrap();
        assert!(!engine.exceptions().is_empty());
        assert_eq!(engine.silence_name(), "sil");
    }

    #[test]
    fn alphabet_accessors() {
        let engine = PhonemaEngine::builtin().unwrap();
        assert_eq!(engine.letters().len(), 33);
        let phonemes = engine.phonemes();
        assert!(phonemes.contains(&"J0"));
        assert!(phonemes.contains(&"KH0"));
        assert!(phonemes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn missing_dictionary_fails_construction() {
        let config = EngineConfig {
            exceptions_path: Some(PathBuf::from("/nonexistent/exceptions.txt")),
            ..EngineConfig::default()
        };
        assert!(PhonemaEngine::from_config(config).is_err());
    }

    #[test]
    fn config_deserialises_with_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn dedup_keeps_order() {
        let a = Diagnostic::AmbiguousStress { word: "а".into() };
        let b = Diagnostic::AmbiguousStress { word: "б".into() };
        assert_eq!(dedup(vec![a.clone(), b.clone(), a.clone()]), vec![a, b]);
    }
}

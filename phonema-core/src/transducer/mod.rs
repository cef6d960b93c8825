//! Word transducer: one orthographic word to one phoneme sequence.
//!
//! ```text
//! word ─► exception lookup ──hit──► stored transcription
//!              │ miss
//!         stress check ──► Diagnostic::AmbiguousStress
//!              │
//!         hyphenated compound? ──yes──► phrase composer
//!              │ no
//!         normalize_spelling ─► tokenize ─► rules::Walker ─► gemination::collapse
//! ```

pub mod gemination;
pub mod normalize;
pub mod rules;

pub use gemination::collapse;
pub use normalize::normalize_spelling;

use tracing::debug;

use crate::engine::PhonemaEngine;
use crate::error::{PhonemaError, Result};
use crate::letters::{is_clitic, is_letter, is_vowel, prepare_text, tokenize, STRESS_MARK};
use crate::phrase;
use crate::transcript::{Diagnostic, Transcription};
use rules::Walker;

/// `true` when a word has more than one vowel and no stress mark.
pub fn is_stress_ambiguous(word: &str) -> bool {
    !word.contains(STRESS_MARK) && word.chars().filter(|&c| is_vowel(c)).count() > 1
}

pub(crate) fn transcribe_word(
    engine: &PhonemaEngine,
    source: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Transcription> {
    let word = prepare_text(source);
    check_word(source, &word)?;

    if let Some(found) = engine.exceptions().lookup(&word) {
        debug!(word = %word, "exception dictionary hit");
        return Ok(found.clone());
    }

    if engine.config().report_ambiguous_stress && is_stress_ambiguous(&word) {
        debug!(word = %word, "stress is not marked");
        diagnostics.push(Diagnostic::AmbiguousStress {
            word: source.to_string(),
        });
    }

    let word = if word.contains('-') {
        if !is_clitic(&word) {
            let parts = phrase::split_hyphenated(&word);
            if parts.is_empty() {
                return Err(PhonemaError::invalid(source, "this word is incorrect"));
            }
            debug!(word = %word, "hyphenated compound transcribed as a phrase");
            return phrase::compose(engine, &parts.join(" "), diagnostics);
        }
        word.replace('-', "")
    } else {
        word
    };

    let prepared = normalize_spelling(&word);
    let units = tokenize(&prepared).map_err(|err| match err {
        PhonemaError::InvalidInput { reason, .. } => PhonemaError::invalid(source, reason),
        other => other,
    })?;

    let raw = Walker::new(source, &units, engine.table()).run()?;
    if raw.is_empty() {
        return Err(PhonemaError::TranscriptionEmpty {
            word: source.to_string(),
        });
    }
    Ok(collapse(&raw))
}

fn check_word(source: &str, word: &str) -> Result<()> {
    if word.is_empty() {
        return Err(PhonemaError::invalid(source, "the word is empty"));
    }
    if let Some(c) = word
        .chars()
        .find(|&c| !(is_letter(c) || c == STRESS_MARK || c == '-'))
    {
        return Err(PhonemaError::invalid(
            source,
            format!("inadmissible character `{c}`"),
        ));
    }
    if !word.chars().any(is_letter) {
        return Err(PhonemaError::invalid(source, "the word has no letters"));
    }
    Ok(())
}

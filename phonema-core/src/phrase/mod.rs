//! Phrase composer: clitic grouping and cross-word liaison.
//!
//! ## Algorithm
//!
//! 1. Split the phrase on whitespace; hyphenated tokens that are neither a
//!    clitic nor an exception entry are split further, and a trailing part
//!    that is a hyphen-attached particle keeps its `-` (`кто-нибудь` becomes
//!    `кто`, `-нибудь`).
//! 2. Every unit is transcribed on its own. This validates each word and
//!    collects its diagnostics.
//! 3. Units are grouped: a proclitic takes its host and an optional
//!    enclitic after it, a content word takes a following enclitic, and
//!    `sil` stands alone.
//! 4. Groups are folded left to right. Consecutive content groups form a
//!    run whose spelling is concatenated and transcribed again as a single
//!    pseudo-word, so voicing and softness assimilate across the word
//!    boundary. A pause closes the run.

use std::ops::Range;

use tracing::debug;

use crate::engine::PhonemaEngine;
use crate::error::{PhonemaError, Result};
use crate::letters::{in_enclitics, in_proclitics, is_clitic, is_letter, prepare_text, STRESS_MARK};
use crate::transcript::{Diagnostic, Transcription, SILENCE};
use crate::transducer::{self, gemination::join};

/// Split a hyphenated word into phrase units.
///
/// Empty parts are dropped. Any part after the first that is a listed
/// hyphen particle (`-то`, `-ка`, ...) keeps its leading hyphen so that
/// grouping recognises it as an enclitic.
pub fn split_hyphenated(word: &str) -> Vec<String> {
    word.split('-')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(index, part)| {
            let attached = format!("-{part}");
            if index > 0 && in_enclitics(&attached) {
                attached
            } else {
                part.to_string()
            }
        })
        .collect()
}

/// Group phrase units into index ranges.
///
/// # Errors
/// `InvalidInput` when a proclitic is not followed by a content word or an
/// enclitic has no host.
pub fn group_units<S: AsRef<str>>(units: &[S], phrase: &str) -> Result<Vec<Range<usize>>> {
    let is_content = |i: usize| {
        units
            .get(i)
            .is_some_and(|u| !is_silence(u.as_ref()) && !is_clitic(u.as_ref()))
    };
    let is_enclitic = |i: usize| units.get(i).is_some_and(|u| in_enclitics(u.as_ref()));

    let mut groups = Vec::with_capacity(units.len());
    let mut i = 0;
    while i < units.len() {
        let unit = units[i].as_ref();
        let end = if is_silence(unit) {
            i + 1
        } else if in_enclitics(unit) {
            return Err(PhonemaError::invalid(
                phrase,
                format!("enclitic `{unit}` has no word to attach to"),
            ));
        } else if in_proclitics(unit) {
            if !is_content(i + 1) {
                return Err(PhonemaError::invalid(
                    phrase,
                    format!("proclitic `{unit}` must be followed by a content word"),
                ));
            }
            if is_enclitic(i + 2) {
                i + 3
            } else {
                i + 2
            }
        } else if is_enclitic(i + 1) {
            i + 2
        } else {
            i + 1
        };
        groups.push(i..end);
        i = end;
    }
    Ok(groups)
}

/// Transcribe a whole phrase.
pub(crate) fn compose(
    engine: &PhonemaEngine,
    phrase: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Transcription> {
    let prepared = prepare_text(phrase);
    check_phrase(phrase, &prepared)?;
    let units = phrase_units(engine, phrase, &prepared)?;

    let mut standalone = Vec::with_capacity(units.len());
    for unit in &units {
        let transcription = if is_silence(unit) {
            Transcription::silence()
        } else {
            transducer::transcribe_word(engine, unit, diagnostics)?
        };
        standalone.push(transcription);
    }

    let groups = group_units(&units, phrase)?;
    debug!(phrase = %prepared, groups = groups.len(), "phrase grouped");

    let mut settled = Transcription::new();
    let mut run: Option<Run> = None;
    for range in groups {
        if range.len() == 1 && is_silence(&units[range.start]) {
            if let Some(open) = run.take() {
                settled = join(&settled, &open.phonemes);
            }
            settled = join(&settled, &Transcription::silence());
            continue;
        }
        let surface = surface_of(&units[range.clone()]);
        run = Some(match run.take() {
            None if range.len() == 1 => Run {
                surface,
                phonemes: standalone[range.start].clone(),
            },
            None => Run::derive(engine, surface)?,
            Some(open) => Run::derive(engine, open.surface + &surface)?,
        });
    }
    if let Some(open) = run {
        settled = join(&settled, &open.phonemes);
    }
    Ok(settled)
}

/// Consecutive content groups folded since the last pause.
struct Run {
    surface: String,
    phonemes: Transcription,
}

impl Run {
    fn derive(engine: &PhonemaEngine, surface: String) -> Result<Self> {
        // Per-word diagnostics were already collected from the standalone pass.
        let phonemes = transducer::transcribe_word(engine, &surface, &mut Vec::new())?;
        Ok(Self { surface, phonemes })
    }
}

fn is_silence(unit: &str) -> bool {
    unit == SILENCE
}

fn surface_of(units: &[String]) -> String {
    units.iter().flat_map(|u| u.chars()).filter(|&c| c != '-').collect()
}

fn check_phrase(source: &str, phrase: &str) -> Result<()> {
    if phrase.trim().is_empty() {
        return Err(PhonemaError::invalid(source, "the phrase is empty"));
    }
    let allowed = |c: char| {
        is_letter(c) || c.is_whitespace() || matches!(c, STRESS_MARK | '-' | 's' | 'i' | 'l')
    };
    if let Some(c) = phrase.chars().find(|&c| !allowed(c)) {
        return Err(PhonemaError::invalid(
            source,
            format!("inadmissible character `{c}`"),
        ));
    }
    let malformed = phrase
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|piece| !piece.is_empty())
        .find(|piece| *piece != SILENCE && !piece.chars().any(is_letter));
    if let Some(piece) = malformed {
        return Err(PhonemaError::invalid(
            source,
            format!("`{piece}` is neither a word nor a pause"),
        ));
    }
    Ok(())
}

fn phrase_units(engine: &PhonemaEngine, source: &str, phrase: &str) -> Result<Vec<String>> {
    let mut units = Vec::new();
    for token in phrase.split_whitespace() {
        let keep_whole =
            !token.contains('-') || is_clitic(token) || engine.exceptions().contains(token);
        if keep_whole {
            units.push(token.to_string());
            continue;
        }
        let parts = split_hyphenated(token);
        if parts.is_empty() {
            return Err(PhonemaError::invalid(
                source,
                format!("`{token}` has no word between its hyphens"),
            ));
        }
        units.extend(parts);
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use crate::exceptions::ExceptionDictionary;
    use crate::table::TableHandle;

    fn engine() -> PhonemaEngine {
        let dict = ExceptionDictionary::parse("test", "что SH T O0\nкто-то K T O0 T A\n").unwrap();
        PhonemaEngine::new(EngineConfig::default(), TableHandle::default(), dict)
    }

    fn phrase(text: &str) -> Vec<String> {
        let mut diagnostics = Vec::new();
        compose(&engine(), text, &mut diagnostics)
            .unwrap()
            .iter()
            .map(|t| t.as_str().to_string())
            .collect()
    }

    fn groups(units: &[&str]) -> Result<Vec<Range<usize>>> {
        group_units(units, &units.join(" "))
    }

    #[test]
    fn hyphen_particles_keep_their_hyphen() {
        assert_eq!(split_hyphenated("кто-нибудь"), ["кто", "-нибудь"]);
        assert_eq!(split_hyphenated("северо-запад"), ["северо", "запад"]);
        assert_eq!(split_hyphenated("то-то"), ["то", "-то"]);
        assert!(split_hyphenated("--").is_empty());
    }

    #[test]
    fn proclitic_takes_host_and_enclitic() {
        assert_eq!(groups(&["в", "дом"]).unwrap(), [0..2]);
        assert_eq!(groups(&["в", "дом", "же"]).unwrap(), [0..3]);
        assert_eq!(groups(&["в", "дом", "кот"]).unwrap(), [0..2, 2..3]);
    }

    #[test]
    fn content_word_takes_enclitic() {
        assert_eq!(groups(&["дом", "-то", "кот"]).unwrap(), [0..2, 2..3]);
    }

    #[test]
    fn silence_stands_alone() {
        assert_eq!(groups(&["sil"]).unwrap(), [0..1]);
        assert_eq!(groups(&["дом", "sil", "кот"]).unwrap(), [0..1, 1..2, 2..3]);
    }

    #[test]
    fn grouping_errors() {
        for units in [
            &["в", "sil"][..],
            &["в"],
            &["в", "на", "дом"],
            &["в", "же"],
            &["же"],
            &["дом", "же", "ли"],
        ] {
            let err = groups(units).unwrap_err();
            assert!(err.is_invalid_input(), "{units:?}");
        }
    }

    #[test]
    fn lone_silence() {
        assert_eq!(phrase("sil"), ["sil"]);
        assert_eq!(phrase("SIL"), ["sil"]);
    }

    #[test]
    fn proclitic_assimilates_to_host() {
        assert_eq!(phrase("с до+ма"), ["Z", "D", "O0", "M", "A"]);
        assert_eq!(phrase("в до+м"), ["V", "D", "O0", "M"]);
    }

    #[test]
    fn three_unit_group_is_one_spelling() {
        assert_eq!(phrase("в до+м же"), ["V", "D", "O0", "M", "ZH", "Y"]);
    }

    #[test]
    fn enclitic_joins_content_word() {
        assert_eq!(phrase("бы+л бы"), ["B", "Y0", "L", "B", "Y"]);
    }

    #[test]
    fn content_words_assimilate_across_boundary() {
        assert_eq!(phrase("ко+т бы+л"), ["K", "O0", "D", "B", "Y0", "L"]);
    }

    #[test]
    fn run_spans_every_word_since_last_pause() {
        assert_eq!(
            phrase("ко+т бы+л до+ма"),
            ["K", "O0", "D", "B", "Y0", "L", "D", "O0", "M", "A"]
        );
    }

    #[test]
    fn pause_blocks_assimilation() {
        assert_eq!(phrase("ко+т sil бы+л"), ["K", "O0", "T", "sil", "B", "Y0", "L"]);
        assert_eq!(phrase("sil sil"), ["sil", "sil"]);
    }

    #[test]
    fn isolated_exception_keeps_stored_transcription() {
        assert_eq!(phrase("sil что sil"), ["sil", "SH", "T", "O0", "sil"]);
        assert_eq!(phrase("кто-то"), ["K", "T", "O0", "T", "A"]);
    }

    #[test]
    fn validation_errors() {
        let mut diagnostics = Vec::new();
        for bad in ["", "   ", "дом 12", "дом + кот", "в sil", "дом - кот", "house"] {
            let err = compose(&engine(), bad, &mut diagnostics).unwrap_err();
            assert!(err.is_invalid_input(), "{bad:?} gave {err}");
        }
    }

    #[test]
    fn standalone_diagnostics_are_collected() {
        let mut diagnostics = Vec::new();
        compose(&engine(), "молоко sil", &mut diagnostics).unwrap();
        assert_eq!(
            diagnostics,
            [Diagnostic::AmbiguousStress {
                word: "молоко".into()
            }]
        );
    }
}

//! Word list input and pronunciation dictionary output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use phonema_core::letters::{strip_stress, COMBINING_ACUTE, STRESS_MARK};
use phonema_core::Transcription;
use serde::Serialize;

/// Summary written by `--report`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub source: String,
    pub total: usize,
    pub transcribed: usize,
    pub failed: usize,
    pub dictionary_lines: usize,
    pub diagnostics: usize,
    pub threads: usize,
    pub elapsed_ms: u128,
}

/// Read a newline-delimited word list: trimmed, blanks skipped, sorted and
/// deduplicated.
pub fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read word list {}", path.display()))?;
    let mut words: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        bail!("{} contains no words", path.display());
    }
    words.sort();
    words.dedup();
    Ok(words)
}

/// The spelling with its stress marks, then the spelling without them when
/// that differs. A combining acute is written as `+`.
pub fn spelling_variants(spelling: &str) -> Vec<String> {
    let stressed = spelling.replace(COMBINING_ACUTE, &STRESS_MARK.to_string());
    let plain = strip_stress(&stressed);
    if plain == stressed {
        vec![plain]
    } else {
        vec![stressed, plain]
    }
}

/// Kaldi-style word-position suffixes. Pauses split the sequence into words
/// and carry no suffix.
pub fn position_dependent(phonemes: &Transcription) -> Vec<String> {
    let tokens = phonemes.as_slice();
    let mut out = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        if token.is_silence() {
            out.push(token.to_string());
            continue;
        }
        let starts = i == 0 || tokens[i - 1].is_silence();
        let ends = i + 1 == tokens.len() || tokens[i + 1].is_silence();
        let suffix = match (starts, ends) {
            (true, true) => "_S",
            (true, false) => "_B",
            (false, true) => "_E",
            (false, false) => "_I",
        };
        out.push(format!("{token}{suffix}"));
    }
    out
}

pub fn format_entry(spelling: &str, phonemes: &[String]) -> String {
    let mut line = String::from(spelling);
    for phoneme in phonemes {
        line.push(' ');
        line.push_str(phoneme);
    }
    line
}

/// Write `spelling PH1 PH2 ...` lines and return how many were written.
pub fn write_dictionary(
    path: &Path,
    entries: &[(String, Transcription)],
    position_dependent_phones: bool,
) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("failed to create dictionary {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let mut lines = 0;
    for (spelling, phonemes) in entries {
        let symbols = if position_dependent_phones {
            position_dependent(phonemes)
        } else {
            phonemes.iter().map(|t| t.to_string()).collect()
        };
        for variant in spelling_variants(spelling) {
            writeln!(out, "{}", format_entry(&variant, &symbols))?;
            lines += 1;
        }
    }
    out.flush()?;
    Ok(lines)
}

pub fn write_bad_words(path: &Path, failures: &[String]) -> Result<()> {
    let mut sorted = failures.to_vec();
    sorted.sort();
    let file = File::create(path)
        .with_context(|| format!("failed to create bad-word file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for word in &sorted {
        writeln!(out, "{word}")?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_report(path: &Path, report: &BatchReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("failed to write report {}", path.display()))
}

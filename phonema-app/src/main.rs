//! `phonema`: builds a pronunciation dictionary from a word list.
//!
//! ```text
//! words.txt ─► sort ─► batch workers (one shared PhonemaEngine) ─┬─► dict.txt
//!                                                                ├─► bad.txt
//!                                                                └─► report.json
//! ```
//!
//! Settings come from a JSON file, then `PHONEMA_*` environment variables,
//! then command-line flags; later sources win.

mod batch;
mod lexicon;
mod settings;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use phonema_core::PhonemaEngine;
use settings::{default_settings_path, load_settings, AppSettings};
use tracing::info;

const USAGE: &str = "Usage: phonema --src <words.txt> --dst <dict.txt> --bad <bad.txt> \\
  [--exceptions <file>] [--settings <file.json>] [--threads <n>] \\
  [--position-dependent] [--report <file.json>]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    src: PathBuf,
    dst: PathBuf,
    bad: PathBuf,
    exceptions: Option<PathBuf>,
    settings: Option<PathBuf>,
    threads: Option<usize>,
    position_dependent: bool,
    report: Option<PathBuf>,
}

impl Args {
    fn apply_to(&self, settings: &mut AppSettings) {
        if let Some(path) = &self.exceptions {
            settings.exceptions_path = Some(path.clone());
        }
        if let Some(threads) = self.threads {
            settings.threads = threads;
        }
        if self.position_dependent {
            settings.position_dependent = true;
        }
    }
}

/// `Ok(None)` means help was requested.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<Args>> {
    let mut src = None;
    let mut dst = None;
    let mut bad = None;
    let mut parsed = Args::default();

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        let mut value = |name: &str| {
            it.next()
                .with_context(|| format!("missing value for {name}"))
        };
        match arg.as_str() {
            "--src" => src = Some(PathBuf::from(value("--src")?)),
            "--dst" => dst = Some(PathBuf::from(value("--dst")?)),
            "--bad" => bad = Some(PathBuf::from(value("--bad")?)),
            "--exceptions" => parsed.exceptions = Some(PathBuf::from(value("--exceptions")?)),
            "--settings" => parsed.settings = Some(PathBuf::from(value("--settings")?)),
            "--report" => parsed.report = Some(PathBuf::from(value("--report")?)),
            "--threads" => {
                let raw = value("--threads")?;
                let threads = raw
                    .parse::<usize>()
                    .with_context(|| format!("invalid value for --threads: {raw}"))?;
                parsed.threads = Some(threads);
            }
            "--position-dependent" => parsed.position_dependent = true,
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument: {other}"),
        }
    }

    parsed.src = src.context("--src is required")?;
    parsed.dst = dst.context("--dst is required")?;
    parsed.bad = bad.context("--bad is required")?;
    Ok(Some(parsed))
}

fn run(args: Args) -> Result<()> {
    let settings_path = args.settings.clone().unwrap_or_else(default_settings_path);
    let mut settings = load_settings(&settings_path);
    settings.apply_env_overrides();
    args.apply_to(&mut settings);
    settings.normalize();

    let engine = PhonemaEngine::from_config(settings.engine_config())
        .context("failed to load the exception dictionary")?;

    let words = lexicon::read_word_list(&args.src)?;
    info!(
        "transcribing {} entries from {:?} on {} threads",
        words.len(),
        args.src,
        settings.threads
    );
    let outcome = batch::transcribe_all(&engine, &words, settings.threads);

    let lines = lexicon::write_dictionary(&args.dst, &outcome.entries, settings.position_dependent)?;
    lexicon::write_bad_words(&args.bad, &outcome.failures)?;
    info!(
        "{} entries transcribed, {} failed, {} dictionary lines written in {:.1?}",
        outcome.entries.len(),
        outcome.failures.len(),
        lines,
        outcome.elapsed
    );

    if let Some(path) = &args.report {
        let report = lexicon::BatchReport {
            source: args.src.display().to_string(),
            total: words.len(),
            transcribed: outcome.entries.len(),
            failed: outcome.failures.len(),
            dictionary_lines: lines,
            diagnostics: outcome.diagnostics,
            threads: settings.threads,
            elapsed_ms: outcome.elapsed.as_millis(),
        };
        lexicon::write_report(path, &report)?;
        info!("report written to {:?}", path);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("phonema=info")),
        )
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{USAGE}");
            return;
        }
        Err(e) => {
            eprintln!("{e:#}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("phonema failed: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn parses_required_and_optional_flags() {
        let args = parse_args(argv(&[
            "--src",
            "w.txt",
            "--dst",
            "d.txt",
            "--bad",
            "b.txt",
            "--threads",
            "3",
            "--position-dependent",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(args.src, PathBuf::from("w.txt"));
        assert_eq!(args.threads, Some(3));
        assert!(args.position_dependent);
        assert_eq!(args.report, None);
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse_args(argv(&["--help"])).unwrap(), None);
    }

    #[test]
    fn argument_errors() {
        assert!(parse_args(argv(&["--src", "w.txt"])).is_err());
        assert!(parse_args(argv(&["--src"])).is_err());
        assert!(parse_args(argv(&["--bogus"])).is_err());
        assert!(parse_args(argv(&[
            "--src", "w", "--dst", "d", "--bad", "b", "--threads", "x"
        ]))
        .is_err());
    }

    #[test]
    fn flags_override_settings() {
        let mut settings = AppSettings {
            threads: 8,
            ..AppSettings::default()
        };
        let args = Args {
            exceptions: Some(PathBuf::from("ex.txt")),
            threads: Some(2),
            position_dependent: true,
            ..Args::default()
        };
        args.apply_to(&mut settings);
        assert_eq!(settings.threads, 2);
        assert!(settings.position_dependent);
        assert_eq!(settings.exceptions_path, Some(PathBuf::from("ex.txt")));
    }

    #[test]
    fn end_to_end_run() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("words.txt");
        fs::write(&src, "ду+б\nhouse\nко+т бы+л\n").unwrap();
        let settings_path = dir.path().join("settings.json");
        fs::write(&settings_path, r#"{ "threads": 2 }"#).unwrap();
        let args = Args {
            src,
            dst: dir.path().join("dict.txt"),
            bad: dir.path().join("bad.txt"),
            settings: Some(settings_path),
            report: Some(dir.path().join("report.json")),
            ..Args::default()
        };
        run(args).unwrap();

        let dict = fs::read_to_string(dir.path().join("dict.txt")).unwrap();
        assert_eq!(
            dict,
            "ду+б D U0 P\nдуб D U0 P\nко+т бы+л K O0 D B Y0 L\nкот был K O0 D B Y0 L\n"
        );
        let bad = fs::read_to_string(dir.path().join("bad.txt")).unwrap();
        assert_eq!(bad, "house\n");
        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("report.json")).unwrap())
                .unwrap();
        assert_eq!(report["failed"], 1);
        assert_eq!(report["dictionaryLines"], 4);
    }
}

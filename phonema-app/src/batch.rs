//! Parallel transcription of a word list.
//!
//! ## Threading
//!
//! ```text
//! words ─► job channel ─► N scoped workers (shared &PhonemaEngine) ─► result channel
//!                                  │
//!                         Mutex<Progress> ─► info! every whole percent
//! ```
//!
//! Results are put back into input order before they are returned.

use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use phonema_core::{PhonemaEngine, PhonemaError, Transcribed, Transcription};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Transcribed entries, in input order.
    pub entries: Vec<(String, Transcription)>,
    /// Entries that could not be transcribed, in input order.
    pub failures: Vec<String>,
    /// Diagnostics reported across all entries.
    pub diagnostics: usize,
    pub elapsed: Duration,
}

struct Progress {
    total: usize,
    done: usize,
    last_percent: usize,
}

impl Progress {
    fn new(total: usize) -> Self {
        Self {
            total,
            done: 0,
            last_percent: 0,
        }
    }

    fn advance(&mut self) {
        self.done += 1;
        if self.total == 0 {
            return;
        }
        let percent = self.done * 100 / self.total;
        if percent > self.last_percent {
            self.last_percent = percent;
            info!("{percent}% transcribed ({}/{})", self.done, self.total);
        }
    }
}

/// Entries containing whitespace are phrases; everything else is a word.
pub fn transcribe_entry(engine: &PhonemaEngine, entry: &str) -> Result<Transcribed, PhonemaError> {
    if entry.contains(char::is_whitespace) {
        engine.phrase_to_phonemes(entry)
    } else {
        engine.word_to_phonemes(entry)
    }
}

pub fn transcribe_all(engine: &PhonemaEngine, words: &[String], threads: usize) -> BatchOutcome {
    let started = Instant::now();
    let (job_tx, job_rx) = crossbeam_channel::unbounded::<(usize, &str)>();
    let (result_tx, result_rx) =
        crossbeam_channel::unbounded::<(usize, Result<Transcribed, PhonemaError>)>();

    for (index, word) in words.iter().enumerate() {
        if job_tx.send((index, word.as_str())).is_err() {
            break;
        }
    }
    drop(job_tx);

    let progress = Mutex::new(Progress::new(words.len()));
    thread::scope(|scope| {
        for _ in 0..threads.max(1) {
            let jobs = job_rx.clone();
            let results = result_tx.clone();
            let progress = &progress;
            scope.spawn(move || {
                for (index, word) in jobs.iter() {
                    let outcome = transcribe_entry(engine, word);
                    progress.lock().advance();
                    if results.send((index, outcome)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(result_tx);

    let mut results: Vec<_> = result_rx.iter().collect();
    results.sort_unstable_by_key(|(index, _)| *index);

    let mut outcome = BatchOutcome::default();
    for (index, result) in results {
        let word = &words[index];
        match result {
            Ok(transcribed) => {
                for diagnostic in &transcribed.diagnostics {
                    debug!("{diagnostic}");
                }
                outcome.diagnostics += transcribed.diagnostics.len();
                outcome.entries.push((word.clone(), transcribed.phonemes));
            }
            Err(e) => {
                warn!("skipping {word:?}: {e}");
                outcome.failures.push(word.clone());
            }
        }
    }
    outcome.elapsed = started.elapsed();
    outcome
}

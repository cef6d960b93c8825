//! # phonema-core
//!
//! Rule-based grapheme-to-phoneme engine for Russian.
//!
//! ## Architecture
//!
//! ```text
//! phrase ─► phrase::compose ─► clitic grouping ─► left fold over runs
//!                                   │
//!                                   ▼
//! word ──► transducer::transcribe_word ◄──► ExceptionDictionary
//!                  │
//!      normalize_spelling → tokenize → rules::Walker ◄── RealizationTable
//!                  │
//!           gemination::collapse ─► Transcription (+ Diagnostics)
//! ```
//!
//! All data is loaded once and shared read-only; `PhonemaEngine` is
//! `Send + Sync` and calls never block.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod engine;
pub mod error;
pub mod exceptions;
pub mod letters;
pub mod phrase;
pub mod table;
pub mod transcript;
pub mod transducer;

// Convenience re-exports for downstream crates
pub use engine::{EngineConfig, PhonemaEngine};
pub use error::{PhonemaError, Result};
pub use exceptions::ExceptionDictionary;
pub use table::{RealizationTable, StandardTable, TableHandle};
pub use transcript::{Diagnostic, PhonemeToken, Transcribed, Transcription};

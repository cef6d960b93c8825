//! Grapheme realization table abstraction.
//!
//! The `RealizationTable` trait is the data seam of the engine: the rule
//! walker decides *which case* applies to a letter, the table decides *which
//! phoneme* that case produces. Swap in a fixture table in tests, or a
//! dialect-specific one, without touching the transducer.

pub mod standard;

pub use standard::StandardTable;

use std::sync::Arc;

/// Left context of a vowel, as seen by the vowel rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeftContext {
    /// Word start, after a vowel, or after a sign.
    Open,
    /// After й, ч, щ.
    SoftOnly,
    /// After ж, ш, ц.
    HardOnly,
    /// After any hard/soft-pairable consonant.
    Pairable,
}

/// Positional case of a vowel: left context plus word-final flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VowelCase {
    pub left: LeftContext,
    pub is_final: bool,
}

impl VowelCase {
    pub fn new(left: LeftContext, is_final: bool) -> Self {
        Self { left, is_final }
    }

    /// Case number 1–8; odd numbers are word-final.
    pub fn number(self) -> u8 {
        let base = match self.left {
            LeftContext::Open => 1,
            LeftContext::SoftOnly => 3,
            LeftContext::HardOnly => 5,
            LeftContext::Pairable => 7,
        };
        if self.is_final {
            base
        } else {
            base + 1
        }
    }
}

/// Voicing/softness case of a consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsonantCase {
    /// Devoiced, hard.
    DeafHard,
    /// Devoiced, soft.
    DeafSoft,
    /// Own voicing, hard.
    NeutralHard,
    /// Own voicing, soft.
    NeutralSoft,
    /// Voiced by assimilation, hard.
    VoicedHard,
    /// Voiced by assimilation, soft.
    VoicedSoft,
}

impl ConsonantCase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeafHard => "d_hard",
            Self::DeafSoft => "d_soft",
            Self::NeutralHard => "n_hard",
            Self::NeutralSoft => "n_soft",
            Self::VoicedHard => "v_hard",
            Self::VoicedSoft => "v_soft",
        }
    }
}

/// Contract for phoneme realization data.
///
/// Implementations are immutable once built and shared across threads.
/// `None` means the table has no entry; the transducer reports that as an
/// invariant violation rather than guessing.
pub trait RealizationTable: Send + Sync + 'static {
    /// Phoneme for a vowel letter in the given case.
    fn vowel(&self, letter: char, stressed: bool, case: VowelCase) -> Option<&str>;

    /// Phoneme for a consonant letter in the given case.
    fn consonant(&self, letter: char, case: ConsonantCase) -> Option<&str>;

    /// Every phoneme this table can produce.
    fn phonemes(&self) -> Vec<&str>;
}

/// Thread-safe reference-counted handle to any `RealizationTable`.
#[derive(Clone)]
pub struct TableHandle(pub Arc<dyn RealizationTable>);

impl TableHandle {
    pub fn new<T: RealizationTable>(table: T) -> Self {
        Self(Arc::new(table))
    }
}

impl Default for TableHandle {
    fn default() -> Self {
        Self::new(StandardTable)
    }
}

impl std::fmt::Debug for TableHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableHandle").finish_non_exhaustive()
    }
}

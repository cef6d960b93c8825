use thiserror::Error;

/// All errors produced by phonema-core.
#[derive(Debug, Error)]
pub enum PhonemaError {
    #[error("`{input}`: {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("{source_name}, line {line}: {reason}")]
    Load {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error("{source_name}: there are no words and their transcriptions")]
    EmptyDictionary { source_name: String },

    #[error("`{word}`: this word cannot be transcribed")]
    TranscriptionEmpty { word: String },

    #[error("`{word}`: rule invariant violated at letter {position}: {detail}")]
    InvariantViolation {
        word: String,
        position: usize,
        detail: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PhonemaError {
    pub(crate) fn invalid(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// `true` for failures caused by the caller's text rather than by the
    /// engine's rule coverage.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, PhonemaError>;

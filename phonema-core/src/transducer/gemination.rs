//! Collapse of adjacent identical sounds into one geminate.

use crate::transcript::{PhonemeToken, Transcription};

/// Merge neighbours whose symbols match once softness and length markers
/// are ignored. The survivor is the later token, tagged as geminate.
///
/// Comparison is always against the previous *input* token, so a run of any
/// length collapses to a single geminate. Silence never geminates: `sil sil`
/// stays two pause tokens instead of merging into one geminate `sill`.
pub fn collapse(tokens: &[PhonemeToken]) -> Transcription {
    let mut out: Vec<PhonemeToken> = Vec::with_capacity(tokens.len());
    let mut previous: Option<&PhonemeToken> = None;
    for token in tokens {
        let repeats =
            !token.is_silence() && previous.is_some_and(|prev| prev.base() == token.base());
        match out.last_mut() {
            Some(last) if repeats => *last = token.geminate(),
            _ => out.push(token.clone()),
        }
        previous = Some(token);
    }
    Transcription::from(out)
}

/// Concatenate two transcriptions and collapse across the seam.
pub fn join(left: &Transcription, right: &Transcription) -> Transcription {
    let joined: Vec<PhonemeToken> = left.iter().chain(right.iter()).cloned().collect();
    collapse(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(symbols: &[&str]) -> Vec<PhonemeToken> {
        symbols.iter().copied().map(PhonemeToken::from).collect()
    }

    #[test]
    fn distinct_tokens_pass_through() {
        let out = collapse(&tokens(&["D", "O0", "M"]));
        assert_eq!(out.as_strs(), ["D", "O0", "M"]);
    }

    #[test]
    fn pair_becomes_geminate_of_second() {
        let out = collapse(&tokens(&["K", "A", "S", "S0", "A"]));
        assert_eq!(out.as_strs(), ["K", "A", "S0l", "A"]);
    }

    #[test]
    fn long_run_collapses_once() {
        let out = collapse(&tokens(&["N", "N", "N0"]));
        assert_eq!(out.as_strs(), ["N0l"]);
    }

    #[test]
    fn collapse_is_idempotent() {
        let once = collapse(&tokens(&["A", "N", "N0", "A", "T", "T"]));
        let twice = collapse(once.as_slice());
        assert_eq!(once, twice);
    }

    #[test]
    fn join_collapses_across_seam() {
        let left = Transcription::from(tokens(&["V", "A", "S"]));
        let right = Transcription::from(tokens(&["S", "A0", "D"]));
        assert_eq!(join(&left, &right).as_strs(), ["V", "A", "Sl", "A0", "D"]);
    }

    #[test]
    fn pauses_stay_separate() {
        let out = collapse(&tokens(&["sil", "sil"]));
        assert_eq!(out.as_strs(), ["sil", "sil"]);
    }

    #[test]
    fn empty_input() {
        assert!(collapse(&[]).is_empty());
    }
}

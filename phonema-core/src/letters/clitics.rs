//! Closed sets of Russian function words that bind to a neighbouring word.

use super::{COMBINING_ACUTE, STRESS_MARK};

/// Function words bound to the following content word: prepositions and
/// negation particles, including the hyphenated compound prepositions.
pub const PROCLITICS: &[&str] = &[
    "без", "безо", "близ", "в", "во", "вне", "для", "до", "за", "из", "изо", "к", "ко", "меж", "на",
    "над", "о", "об", "обо", "от", "ото", "по", "под", "подо", "пред", "предо", "при", "про", "с",
    "со", "у", "чрез", "через", "не", "ни", "из-за", "из-подо", "из-под", "а-ля", "по-над", "по-за",
];

/// Particles bound to the preceding word. Hyphen-attached particles keep
/// their leading `-`.
pub const ENCLITICS: &[&str] = &[
    "бы", "б", "де", "ли", "же", "-то", "-ка", "-либо", "-нибудь", "-таки",
];

fn bare(word: &str) -> String {
    word.chars()
        .filter(|&c| c != STRESS_MARK && c != COMBINING_ACUTE)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Membership in [`PROCLITICS`], ignoring case and stress marks.
pub fn in_proclitics(word: &str) -> bool {
    let word = bare(word);
    PROCLITICS.contains(&word.as_str())
}

/// Membership in [`ENCLITICS`], ignoring case and stress marks.
pub fn in_enclitics(word: &str) -> bool {
    let word = bare(word);
    ENCLITICS.contains(&word.as_str())
}

pub fn is_clitic(word: &str) -> bool {
    in_proclitics(word) || in_enclitics(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_ignores_stress_and_case() {
        assert!(in_proclitics("На+"));
        assert!(in_proclitics("по\u{0301}"));
        assert!(in_enclitics("-ТО"));
        assert!(in_enclitics("ли+"));
    }

    #[test]
    fn sets_do_not_overlap() {
        for word in PROCLITICS {
            assert!(!in_enclitics(word), "{word} is in both sets");
        }
    }

    #[test]
    fn hyphen_is_significant() {
        assert!(in_enclitics("-то"));
        assert!(!in_enclitics("то"));
        assert!(in_proclitics("из-за"));
        assert!(!in_proclitics("изза"));
    }

    #[test]
    fn content_words_are_not_clitics() {
        assert!(!is_clitic("дом"));
        assert!(!is_clitic("sil"));
    }
}

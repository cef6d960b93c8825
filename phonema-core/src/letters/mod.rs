//! Letter classifier for the Russian alphabet.
//!
//! Every Cyrillic letter belongs to exactly one [`LetterCategory`]. The
//! secondary tags consumed by the transducer rules (voicing, palatality,
//! vowel row, iotation) are exposed as pure functions over `char`; there is
//! no mutable state anywhere in this module.
//!
//! Characters outside the alphabet classify as `None`. Rejecting them is the
//! caller's job.

pub mod clitics;
pub mod unit;

pub use clitics::{in_enclitics, in_proclitics, is_clitic, ENCLITICS, PROCLITICS};
pub use unit::{tokenize, LetterUnit};

/// The 33 letters of the Russian alphabet, in code point order.
pub const ALPHABET: [char; 33] = [
    'а', 'б', 'в', 'г', 'д', 'е', 'ж', 'з', 'и', 'й', 'к', 'л', 'м', 'н', 'о', 'п', 'р', 'с', 'т',
    'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я', 'ё',
];

/// Stress mark as it appears after a vowel in prepared input.
pub const STRESS_MARK: char = '+';

/// Combining acute accent, rewritten to [`STRESS_MARK`] on input.
pub const COMBINING_ACUTE: char = '\u{0301}';

/// Primary classification of a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterCategory {
    Vowel,
    /// Hard sign `ъ` or soft sign `ь`.
    Sign,
    Consonant,
}

/// Voicing class of a consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Voicing {
    /// к п с т ф х ц ч ш щ
    Deaf,
    /// Sonorants: в й л м н р
    VoicedWeak,
    /// б г д з ж
    VoicedStrong,
}

/// Whether a consonant can be palatalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palatality {
    /// ж ш ц
    HardOnly,
    /// й ч щ
    SoftOnly,
    /// Every other consonant.
    Pairable,
}

/// Row of a vowel or sign: what it does to a preceding consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VowelRow {
    /// ъ а о у э ы
    Hard,
    /// ь я ё ю е и
    Soft,
}

pub fn category(letter: char) -> Option<LetterCategory> {
    match letter {
        'а' | 'о' | 'у' | 'э' | 'ы' | 'и' | 'я' | 'ё' | 'ю' | 'е' => Some(LetterCategory::Vowel),
        'ъ' | 'ь' => Some(LetterCategory::Sign),
        'б' | 'в' | 'г' | 'д' | 'ж' | 'з' | 'й' | 'к' | 'л' | 'м' | 'н' | 'п' | 'р' | 'с' | 'т'
        | 'ф' | 'х' | 'ц' | 'ч' | 'ш' | 'щ' => Some(LetterCategory::Consonant),
        _ => None,
    }
}

pub fn is_letter(letter: char) -> bool {
    category(letter).is_some()
}

pub fn is_vowel(letter: char) -> bool {
    category(letter) == Some(LetterCategory::Vowel)
}

pub fn is_sign(letter: char) -> bool {
    category(letter) == Some(LetterCategory::Sign)
}

pub fn is_consonant(letter: char) -> bool {
    category(letter) == Some(LetterCategory::Consonant)
}

/// Vowels that carry a /j/ onset at the start of a syllable.
pub fn is_iotated(letter: char) -> bool {
    matches!(letter, 'е' | 'ё' | 'ю' | 'я')
}

pub fn voicing(letter: char) -> Option<Voicing> {
    match letter {
        'к' | 'п' | 'с' | 'т' | 'ф' | 'х' | 'ц' | 'ч' | 'ш' | 'щ' => Some(Voicing::Deaf),
        'в' | 'й' | 'л' | 'м' | 'н' | 'р' => Some(Voicing::VoicedWeak),
        'б' | 'г' | 'д' | 'з' | 'ж' => Some(Voicing::VoicedStrong),
        _ => None,
    }
}

pub fn palatality(letter: char) -> Option<Palatality> {
    match letter {
        'ж' | 'ш' | 'ц' => Some(Palatality::HardOnly),
        'й' | 'ч' | 'щ' => Some(Palatality::SoftOnly),
        c if is_consonant(c) => Some(Palatality::Pairable),
        _ => None,
    }
}

pub fn vowel_row(letter: char) -> Option<VowelRow> {
    match letter {
        'ъ' | 'а' | 'о' | 'у' | 'э' | 'ы' => Some(VowelRow::Hard),
        'ь' | 'я' | 'ё' | 'ю' | 'е' | 'и' => Some(VowelRow::Soft),
        _ => None,
    }
}

/// Consonants that have a voiced/voiceless partner.
pub fn is_paired_by_voicing(letter: char) -> bool {
    matches!(
        letter,
        'б' | 'в' | 'г' | 'д' | 'ж' | 'з' | 'к' | 'п' | 'с' | 'т' | 'ф' | 'ш'
    )
}

pub fn is_unpaired_by_voicing(letter: char) -> bool {
    is_consonant(letter) && !is_paired_by_voicing(letter)
}

/// Lowercase, rewrite the combining acute to `+`, and drop apostrophes.
pub(crate) fn prepare_text(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .map(|c| if c == COMBINING_ACUTE { STRESS_MARK } else { c })
        .collect()
}

/// `text` with every stress mark removed.
pub fn strip_stress(text: &str) -> String {
    text.chars().filter(|&c| c != STRESS_MARK).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_letter_has_exactly_one_category() {
        let vowels = ALPHABET.iter().filter(|&&c| is_vowel(c)).count();
        let signs = ALPHABET.iter().filter(|&&c| is_sign(c)).count();
        let consonants = ALPHABET.iter().filter(|&&c| is_consonant(c)).count();
        assert_eq!((vowels, signs, consonants), (10, 2, 21));
    }

    #[test]
    fn consonant_tags_are_total() {
        for c in ALPHABET.iter().copied().filter(|&c| is_consonant(c)) {
            assert!(voicing(c).is_some(), "{c} has no voicing");
            assert!(palatality(c).is_some(), "{c} has no palatality");
            assert_ne!(is_paired_by_voicing(c), is_unpaired_by_voicing(c));
        }
    }

    #[test]
    fn vowels_and_signs_have_a_row() {
        for c in ALPHABET.iter().copied().filter(|&c| !is_consonant(c)) {
            assert!(vowel_row(c).is_some(), "{c} has no row");
        }
        assert_eq!(vowel_row('б'), None);
    }

    #[test]
    fn latin_is_not_a_letter() {
        assert_eq!(category('a'), None);
        assert_eq!(category('+'), None);
        assert!(!is_letter('-'));
    }

    #[test]
    fn prepare_text_normalises_accent_and_case() {
        assert_eq!(prepare_text("Моло\u{0301}ко"), "моло+ко");
        assert_eq!(prepare_text("об'явление"), "обявление");
    }

    #[test]
    fn alphabet_is_sorted_by_code_point() {
        let mut sorted = ALPHABET;
        sorted.sort_unstable();
        assert_eq!(sorted, ALPHABET);
    }
}

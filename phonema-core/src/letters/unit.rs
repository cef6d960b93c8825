//! Letter units: one letter plus an optional stress mark.

use std::fmt;

use super::{category, LetterCategory, STRESS_MARK};
use crate::error::{PhonemaError, Result};

/// One letter of a prepared word, optionally carrying stress.
///
/// Only vowels may be stressed; [`tokenize`] enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LetterUnit {
    letter: char,
    category: LetterCategory,
    stressed: bool,
}

impl LetterUnit {
    pub fn letter(self) -> char {
        self.letter
    }

    pub fn is_stressed(self) -> bool {
        self.stressed
    }

    pub fn category(self) -> LetterCategory {
        self.category
    }
}

impl fmt::Display for LetterUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stressed {
            write!(f, "{}{}", self.letter, STRESS_MARK)
        } else {
            write!(f, "{}", self.letter)
        }
    }
}

/// Split a prepared (lowercase, hyphen-free) word into letter units.
///
/// A `+` must immediately follow an unstressed vowel and attaches to it.
/// Every other character must be a Russian letter.
pub fn tokenize(word: &str) -> Result<Vec<LetterUnit>> {
    let mut units: Vec<LetterUnit> = Vec::with_capacity(word.len() / 2);
    for c in word.chars() {
        if c == STRESS_MARK {
            match units.last_mut() {
                Some(unit) if unit.category == LetterCategory::Vowel && !unit.stressed => {
                    unit.stressed = true;
                }
                _ => {
                    return Err(PhonemaError::invalid(
                        word,
                        "the stress mark must follow a vowel",
                    ))
                }
            }
        } else if let Some(category) = category(c) {
            units.push(LetterUnit {
                letter: c,
                category,
                stressed: false,
            });
        } else {
            return Err(PhonemaError::invalid(
                word,
                format!("inadmissible character `{c}`"),
            ));
        }
    }
    Ok(units)
}

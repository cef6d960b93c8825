//! Letter-by-letter rule walker.
//!
//! ## Algorithm
//!
//! 1. Signs (ъ, ь) are consumed silently.
//! 2. A vowel looks one unit left: after a vowel, a sign or at word start it
//!    is an open syllable and an iotated vowel gains a `J0` onset; otherwise
//!    the palatality of the preceding consonant selects the case.
//! 3. A consonant looks up to two units right to decide devoicing, voicing
//!    assimilation and softening.
//!
//! Every step must advance the cursor by exactly one unit.

use crate::error::{PhonemaError, Result};
use crate::letters::{
    is_iotated, palatality, voicing, vowel_row, LetterCategory, LetterUnit, Palatality, Voicing,
    VowelRow,
};
use crate::table::{ConsonantCase, LeftContext, RealizationTable, VowelCase};
use crate::transcript::PhonemeToken;

/// Onset inserted before an iotated vowel in an open syllable.
pub const IOTATION: &str = "J0";

/// Realization of `г` before `к` followed by a hard vowel or `ъ`.
pub const GK_HARD: &str = "KH";

/// Realization of `г` before `к` followed by a soft vowel or `ь`.
pub const GK_SOFT: &str = "KH0";

/// Phonemes produced by the rules themselves rather than the table.
pub const RULE_PHONEMES: [&str; 3] = [IOTATION, GK_HARD, GK_SOFT];

/// Letters that let a preceding н, т, с, д, з soften before a soft vowel.
const SOFTENING_CLUSTER_MIDDLE: [char; 11] = ['н', 'т', 'с', 'д', 'з', 'л', 'м', 'п', 'б', 'в', 'ф'];

/// What a lookahead letter does to the consonant before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookahead {
    Deaf,
    VoicedWeak,
    VoicedStrong,
    HardRow,
    SoftRow,
    SoftSign,
}

impl Lookahead {
    fn of(letter: char) -> Option<Self> {
        if letter == 'ь' {
            return Some(Self::SoftSign);
        }
        if let Some(v) = voicing(letter) {
            return Some(match v {
                Voicing::Deaf => Self::Deaf,
                Voicing::VoicedWeak => Self::VoicedWeak,
                Voicing::VoicedStrong => Self::VoicedStrong,
            });
        }
        vowel_row(letter).map(|row| match row {
            VowelRow::Hard => Self::HardRow,
            VowelRow::Soft => Self::SoftRow,
        })
    }

    fn is_soft_group(self) -> bool {
        matches!(self, Self::SoftRow | Self::SoftSign)
    }
}

enum ConsonantChoice {
    Case(ConsonantCase),
    Direct(&'static str),
}

/// One rule application: the phonemes it emitted and the next cursor.
struct Step {
    phonemes: Vec<PhonemeToken>,
    next: usize,
}

pub(crate) struct Walker<'a> {
    word: &'a str,
    units: &'a [LetterUnit],
    table: &'a dyn RealizationTable,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(
        word: &'a str,
        units: &'a [LetterUnit],
        table: &'a dyn RealizationTable,
    ) -> Self {
        Self { word, units, table }
    }

    /// Walk all units and return the raw (uncollapsed) phoneme sequence.
    pub(crate) fn run(&self) -> Result<Vec<PhonemeToken>> {
        let mut phonemes = Vec::with_capacity(self.units.len() + 2);
        let mut pos = 0;
        while pos < self.units.len() {
            let step = match self.units[pos].category() {
                LetterCategory::Sign => {
                    pos += 1;
                    continue;
                }
                LetterCategory::Vowel => self.vowel(pos)?,
                LetterCategory::Consonant => self.consonant(pos)?,
            };
            debug_assert_eq!(step.next, pos + 1, "rule did not consume exactly one unit");
            if step.next != pos + 1 {
                return Err(self.violation(pos, "rule did not consume exactly one unit"));
            }
            phonemes.extend(step.phonemes);
            pos = step.next;
        }
        Ok(phonemes)
    }

    fn vowel(&self, pos: usize) -> Result<Step> {
        let unit = self.units[pos];
        let left = match pos.checked_sub(1).map(|p| self.units[p]) {
            None => LeftContext::Open,
            Some(prev) => match prev.category() {
                LetterCategory::Vowel | LetterCategory::Sign => LeftContext::Open,
                LetterCategory::Consonant => match palatality(prev.letter()) {
                    Some(Palatality::SoftOnly) => LeftContext::SoftOnly,
                    Some(Palatality::HardOnly) => LeftContext::HardOnly,
                    Some(Palatality::Pairable) => LeftContext::Pairable,
                    None => return Err(self.violation(pos - 1, "unclassified consonant")),
                },
            },
        };
        let case = VowelCase::new(left, pos + 1 == self.units.len());

        let mut phonemes = Vec::with_capacity(2);
        if left == LeftContext::Open && is_iotated(unit.letter()) {
            phonemes.push(PhonemeToken::from(IOTATION));
        }
        let realized = self
            .table
            .vowel(unit.letter(), unit.is_stressed(), case)
            .ok_or_else(|| {
                self.violation(
                    pos,
                    &format!("no realization for `{unit}` in case {}", case.number()),
                )
            })?;
        phonemes.push(PhonemeToken::from(realized));
        Ok(Step {
            phonemes,
            next: pos + 1,
        })
    }

    fn consonant(&self, pos: usize) -> Result<Step> {
        let letter = self.units[pos].letter();
        let case = match self.consonant_choice(pos)? {
            ConsonantChoice::Direct(symbol) => {
                return Ok(Step {
                    phonemes: vec![PhonemeToken::from(symbol)],
                    next: pos + 1,
                })
            }
            ConsonantChoice::Case(case) => case,
        };
        let realized = self.table.consonant(letter, case).ok_or_else(|| {
            self.violation(
                pos,
                &format!("no realization for `{letter}` in case {}", case.as_str()),
            )
        })?;
        Ok(Step {
            phonemes: vec![PhonemeToken::from(realized)],
            next: pos + 1,
        })
    }

    fn consonant_choice(&self, pos: usize) -> Result<ConsonantChoice> {
        use ConsonantCase::*;

        if pos + 1 == self.units.len() {
            return Ok(ConsonantChoice::Case(DeafHard));
        }
        let letter = self.units[pos].letter();
        let next_letter = self.units[pos + 1].letter();
        let next = self.lookahead(pos + 1)?;
        let third = match self.units.get(pos + 2) {
            Some(_) => Some(self.lookahead(pos + 2)?),
            None => None,
        };

        // Softening across a cluster: с in "стена", з in "гвоздь".
        if matches!(letter, 'н' | 'т' | 'с' | 'д' | 'з')
            && SOFTENING_CLUSTER_MIDDLE.contains(&next_letter)
            && third.is_some_and(Lookahead::is_soft_group)
        {
            return Ok(ConsonantChoice::Case(NeutralSoft));
        }
        if letter == 'н' && matches!(next_letter, 'ч' | 'щ') {
            return Ok(ConsonantChoice::Case(NeutralSoft));
        }
        if letter == 'г' && next_letter == 'к' {
            if let Some(third) = third {
                return Ok(match third {
                    Lookahead::SoftRow | Lookahead::SoftSign => ConsonantChoice::Direct(GK_SOFT),
                    Lookahead::HardRow => ConsonantChoice::Direct(GK_HARD),
                    _ => ConsonantChoice::Case(DeafHard),
                });
            }
        }

        let case = match next {
            Lookahead::Deaf => DeafHard,
            Lookahead::VoicedWeak | Lookahead::HardRow => NeutralHard,
            Lookahead::VoicedStrong => VoicedHard,
            Lookahead::SoftRow => NeutralSoft,
            Lookahead::SoftSign => match third {
                None | Some(Lookahead::Deaf) | Some(Lookahead::HardRow) => DeafSoft,
                Some(Lookahead::SoftRow | Lookahead::SoftSign | Lookahead::VoicedWeak) => {
                    NeutralSoft
                }
                Some(Lookahead::VoicedStrong) => VoicedSoft,
            },
        };
        Ok(ConsonantChoice::Case(case))
    }

    fn lookahead(&self, pos: usize) -> Result<Lookahead> {
        let letter = self.units[pos].letter();
        Lookahead::of(letter)
            .ok_or_else(|| self.violation(pos, &format!("unclassified letter `{letter}`")))
    }

    fn violation(&self, position: usize, detail: &str) -> PhonemaError {
        PhonemaError::InvariantViolation {
            word: self.word.to_string(),
            position,
            detail: detail.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::tokenize;
    use crate::table::StandardTable;

    fn walk(word: &str) -> Vec<String> {
        let units = tokenize(word).unwrap();
        Walker::new(word, &units, &StandardTable)
            .run()
            .unwrap()
            .into_iter()
            .map(|t| t.as_str().to_string())
            .collect()
    }

    #[test]
    fn final_consonant_is_devoiced() {
        assert_eq!(walk("ду+б"), ["D", "U0", "P"]);
    }

    #[test]
    fn devoicing_before_deaf_consonant() {
        assert_eq!(walk("ло+бка"), ["L", "O0", "P", "K", "A"]);
    }

    #[test]
    fn voicing_before_strong_voiced() {
        assert_eq!(walk("про+сьба"), ["P", "R", "O0", "Z0", "B", "A"]);
        assert_eq!(walk("вокза+л"), ["V", "A", "G", "Z", "A0", "L"]);
    }

    #[test]
    fn iotation_at_word_start_and_after_vowel() {
        assert_eq!(walk("я+ма"), ["J0", "A0", "M", "A"]);
        assert_eq!(walk("мою+"), ["M", "A", "J0", "U0"]);
    }

    #[test]
    fn iotation_after_sign() {
        assert_eq!(walk("семья+"), ["S0", "I", "M0", "J0", "A0"]);
    }

    #[test]
    fn no_iotation_after_consonant() {
        assert_eq!(walk("ня+ня"), ["N0", "A0", "N0", "A"]);
    }

    #[test]
    fn soft_sign_at_word_end() {
        assert_eq!(walk("ко+нь"), ["K", "O0", "N0"]);
        assert_eq!(walk("ма+ть"), ["M", "A0", "T0"]);
    }

    #[test]
    fn cluster_softening() {
        // с before т before soft vowel.
        assert_eq!(walk("сте+на")[0], "S0");
        assert_eq!(walk("ко+нчик")[2], "N0");
    }

    #[test]
    fn gk_digraph() {
        assert_eq!(walk("мя+гкий")[2], GK_SOFT);
        assert_eq!(walk("мя+гко")[2], GK_HARD);
    }

    #[test]
    fn hard_only_consonant_keeps_vowel_hard() {
        assert_eq!(walk("жи+ть"), ["ZH", "Y0", "T0"]);
    }

    #[test]
    fn soft_only_consonant_case() {
        assert_eq!(walk("ча+шка"), ["CH0", "A0", "SH", "K", "A"]);
    }

    #[test]
    fn signs_emit_nothing() {
        assert!(walk("ъ").is_empty());
    }

    #[test]
    fn missing_table_entry_is_invariant_violation() {
        struct Empty;
        impl RealizationTable for Empty {
            fn vowel(&self, _: char, _: bool, _: VowelCase) -> Option<&str> {
                None
            }
            fn consonant(&self, _: char, _: ConsonantCase) -> Option<&str> {
                None
            }
            fn phonemes(&self) -> Vec<&str> {
                Vec::new()
            }
        }
        let units = tokenize("да").unwrap();
        let err = Walker::new("да", &units, &Empty).run().unwrap_err();
        assert!(matches!(err, PhonemaError::InvariantViolation { position: 0, .. }));
    }
}

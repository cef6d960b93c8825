//! Default realization table for standard Russian pronunciation.
//!
//! ## Vowels
//!
//! Stressed vowels map to the `…0` phonemes. Unstressed vowels reduce:
//! `о` merges with `а`, `е`/`я`/`и` merge into `I` after soft consonants,
//! and after the hard-only consonants ж, ш, ц the front vowels surface as `Y`.
//!
//! ## Consonants
//!
//! Each consonant has six realizations, indexed by [`ConsonantCase`]. The
//! hard-only consonants never soften and the soft-only ones are always soft.

use super::{ConsonantCase, LeftContext, RealizationTable, VowelCase};

/// Forms in `ConsonantCase` order: d_hard, d_soft, n_hard, n_soft, v_hard, v_soft.
const CONSONANTS: [(char, [&str; 6]); 21] = [
    ('б', ["P", "P0", "B", "B0", "B", "B0"]),
    ('в', ["F", "F0", "V", "V0", "V", "V0"]),
    ('г', ["K", "K0", "G", "G0", "G", "G0"]),
    ('д', ["T", "T0", "D", "D0", "D", "D0"]),
    ('ж', ["SH", "SH", "ZH", "ZH", "ZH", "ZH"]),
    ('з', ["S", "S0", "Z", "Z0", "Z", "Z0"]),
    ('й', ["J0", "J0", "J0", "J0", "J0", "J0"]),
    ('к', ["K", "K0", "K", "K0", "G", "G0"]),
    ('л', ["L", "L0", "L", "L0", "L", "L0"]),
    ('м', ["M", "M0", "M", "M0", "M", "M0"]),
    ('н', ["N", "N0", "N", "N0", "N", "N0"]),
    ('п', ["P", "P0", "P", "P0", "B", "B0"]),
    ('р', ["R", "R0", "R", "R0", "R", "R0"]),
    ('с', ["S", "S0", "S", "S0", "Z", "Z0"]),
    ('т', ["T", "T0", "T", "T0", "D", "D0"]),
    ('ф', ["F", "F0", "F", "F0", "V", "V0"]),
    ('х', ["H", "H0", "H", "H0", "H", "H0"]),
    ('ц', ["TS", "TS", "TS", "TS", "DZ", "DZ"]),
    ('ч', ["CH0", "CH0", "CH0", "CH0", "DZH", "DZH"]),
    ('ш', ["SH", "SH", "SH", "SH", "ZH", "ZH"]),
    ('щ', ["SH0", "SH0", "SH0", "SH0", "ZH0", "ZH0"]),
];

/// Every phoneme the standard table can produce.
pub const PHONEMES: [&str; 51] = [
    "U0", "U", "O0", "O", "A0", "A", "E0", "E", "Y0", "Y", "I0", "I", "K0", "K", "H0", "H", "G0",
    "G", "J0", "CH0", "SH0", "SH", "ZH", "R0", "R", "T0", "T", "TS", "S0", "S", "D0", "D", "Z0",
    "Z", "N0", "N", "L0", "L", "P0", "P", "F0", "F", "B0", "B", "V0", "V", "M0", "M", "ZH0", "DZ",
    "DZH",
];

/// The built-in table. Stateless; all data is static.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTable;

impl RealizationTable for StandardTable {
    fn vowel(&self, letter: char, stressed: bool, case: VowelCase) -> Option<&str> {
        let after_hard = case.left == LeftContext::HardOnly;
        let token = if stressed {
            match letter {
                'а' | 'я' => "A0",
                'о' | 'ё' => "O0",
                'у' | 'ю' => "U0",
                'ы' => "Y0",
                'э' | 'е' => "E0",
                'и' if after_hard => "Y0",
                'и' => "I0",
                _ => return None,
            }
        } else {
            match letter {
                'а' | 'о' => "A",
                'у' | 'ю' => "U",
                'ы' => "Y",
                'э' => "E",
                'ё' => "O",
                'и' | 'е' if after_hard => "Y",
                'и' => "I",
                'е' if case.is_final => "E",
                'е' => "I",
                'я' if case.is_final || after_hard => "A",
                'я' => "I",
                _ => return None,
            }
        };
        Some(token)
    }

    fn consonant(&self, letter: char, case: ConsonantCase) -> Option<&str> {
        CONSONANTS
            .iter()
            .find(|(c, _)| *c == letter)
            .map(|(_, forms)| forms[case as usize])
    }

    fn phonemes(&self) -> Vec<&str> {
        PHONEMES.to_vec()
    }
}

//! Spelling normalisation applied before tokenisation.
//!
//! Unpronounced consonants are dropped from clusters and affricate-forming
//! sequences are merged. Each rewrite runs exactly once, in list order, over
//! the output of the previous one; the list is not iterated to a fixpoint.

/// Adjective/pronoun genitive ending and its pronunciation.
const GENITIVE_ENDING: (&str, &str) = ("го", "ва");

const CLUSTER_RULES: [(&str, &str); 19] = [
    ("стн", "сн"),
    ("стл", "сл"),
    ("нтг", "нг"),
    ("здн", "зн"),
    ("здц", "зц"),
    ("ндц", "нц"),
    ("рдц", "рц"),
    ("ндш", "нш"),
    ("гдт", "гт"),
    ("лнц", "нц"),
    ("сч", "щ"),
    ("жч", "щ"),
    ("сш", "ш"),
    ("зж", "ж"),
    ("тс", "ц"),
    ("тьс", "ц"),
    ("тц", "ц"),
    ("дс", "ц"),
    ("дц", "ц"),
];

/// Rewrite a lowercase, hyphen-free word into its pronounced spelling.
pub fn normalize_spelling(word: &str) -> String {
    let mut prepared = word.trim().to_string();
    let (ending, replacement) = GENITIVE_ENDING;
    if prepared.chars().count() > 2 && prepared.ends_with(ending) {
        prepared.truncate(prepared.len() - ending.len());
        prepared.push_str(replacement);
    }
    for (from, to) in CLUSTER_RULES {
        if prepared.contains(from) {
            prepared = prepared.replace(from, to);
        }
    }
    prepared
}

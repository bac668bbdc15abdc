//! Stopword loading and POS-based stopword derivation.
//!
//! A stopword set is just a set of rasms: the chain search and stage C
//! of endpoint resolution never look at anything but
//! `Token::rasm`, so this module's only job is turning some external
//! representation of "these words don't count" into that set.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

/// One morpheme of a POS-tagged Qur'ān corpus entry: several of these
/// sharing a `(sura, vers, word)` triple make up one word.
#[derive(Debug, Deserialize)]
pub struct PosMorpheme {
    pub sura: u16,
    pub vers: u16,
    pub word: u16,
    pub tok: String,
    #[serde(rename = "POS")]
    pub pos: String,
}

/// POS-tag sequences that mark a word as purely functional (pronoun,
/// relative, negation, preposition, conjunction, and a handful of
/// listed combinations) rather than carrying independent lexical
/// content.
const FUNCTIONAL_POS_SEQUENCES: &[&[&str]] = &[
    &["PRON"],
    &["REL"],
    &["NEG"],
    &["P"],
    &["CONJ"],
    &["SUB"],
    &["INTG"],
    &["AVR"],
    &["CONJ", "PRON"],
    &["P", "PRON"],
    &["CONJ", "NEG"],
    &["CONJ", "REL"],
    &["P", "REL"],
    &["CONJ", "P"],
    &["REM", "P", "REL"],
    &["SUP", "AMD"],
    &["REM", "COND"],
    &["INTG", "T"],
];

/// Loads a plain JSON array of stopword surface forms, converting each
/// to its rasm.
pub fn load_json(data: &str) -> serde_json::Result<HashSet<String>> {
    let words: Vec<String> = serde_json::from_str(data)?;
    Ok(words
        .iter()
        .map(|w| crate::rasm::rasm(&crate::normalize::normalise(w)))
        .collect())
}

/// Derives a rasm stopword set from a POS-tagged Qur'ān corpus (a JSON
/// array of [`PosMorpheme`]): a word whose morphemes' POS tags form one
/// of the purely functional sequences is a stopword.
pub fn derive_from_pos_tagged(data: &str) -> serde_json::Result<HashSet<String>> {
    let morphemes: Vec<PosMorpheme> = serde_json::from_str(data)?;

    let mut by_word: BTreeMap<(u16, u16, u16), (String, Vec<String>)> = BTreeMap::new();
    for m in morphemes {
        let entry = by_word.entry((m.sura, m.vers, m.word)).or_default();
        entry.0.push_str(&m.tok);
        entry.1.push(m.pos);
    }

    let mut stopwords = HashSet::new();
    for (token, pos_list) in by_word.into_values() {
        let pos_refs: Vec<&str> = pos_list.iter().map(String::as_str).collect();
        if FUNCTIONAL_POS_SEQUENCES.iter().any(|&seq| seq == pos_refs.as_slice()) {
            stopwords.insert(crate::rasm::rasm(&crate::normalize::normalise(&token)));
        }
    }
    Ok(stopwords)
}

//! Shared data model: tokens, Qur'ān references, chains, and the result
//! records C8 emits.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// A Qur'ān address: sura, verse (āya), and word-within-verse, all
/// 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct QRef {
    pub sura: u16,
    pub verse: u16,
    pub word: u16,
}

/// One word, either from the input text or from the Qur'ān, carrying
/// both script forms a caller or the matcher might need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub original: String,
    pub normalised: String,
    pub rasm: String,
}

impl Token {
    pub fn new(original: &str) -> Self {
        let normalised = crate::normalize::normalise(original);
        let rasm = crate::rasm::rasm(&normalised);
        Token { original: original.to_string(), normalised, rasm }
    }
}

/// The Qur'ān, indexed for chain search.
///
/// `qtext`, `qrasm`, and `sura_names` are built once and held immutable
/// for the tagger's lifetime: nothing mutates after `QuranIndex::build`.
pub struct QuranIndex {
    pub qtext: Vec<(QRef, Token)>,
    pub qrasm: HashMap<String, HashSet<usize>>,
    pub sura_names: HashMap<String, (usize, usize)>,
}

impl QuranIndex {
    pub fn len(&self) -> usize {
        self.qtext.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qtext.is_empty()
    }
}

/// A co-occurring run: text offsets `[i, i+len-1]` aligned one-for-one
/// with Qur'ān offsets `[q, q+len-1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chain {
    pub text_start: usize,
    pub q_start: usize,
    pub len: usize,
}

impl Chain {
    pub fn text_end(&self) -> usize {
        self.text_start + self.len - 1
    }

    pub fn q_end(&self) -> usize {
        self.q_start + self.len - 1
    }
}

/// One surviving chain after endpoint resolution, possibly widened by
/// the ellipsis recogniser into more than one Qur'ān span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text_start: usize,
    pub text_end: usize,
    pub spans: Vec<QuranSpan>,
}

/// One Qur'ān span attached to a result record: `qref_start`/`qref_end`
/// are the addressed endpoints, `q_start`/`q_end` their linear offsets
/// into `qtext`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuranSpan {
    pub qref_start: QRef,
    pub qref_end: QRef,
    pub q_start: usize,
    pub q_end: usize,
}

/// One tagger result: a text span paired with every Qur'ān passage that
/// shares its archigrapheme skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub text_start: usize,
    pub text_end: usize,
    pub spans: Vec<QuranSpan>,
}

/// Tagger configuration.
#[derive(Debug, Clone, Copy)]
pub struct TaggerOptions {
    pub min_tokens: i64,
    pub rasm_match: bool,
    pub min_uncommon: usize,
    pub safe_length: usize,
    pub include_ellipses: bool,
}

impl Default for TaggerOptions {
    fn default() -> Self {
        TaggerOptions {
            min_tokens: 5,
            rasm_match: false,
            min_uncommon: 0,
            safe_length: 4,
            include_ellipses: true,
        }
    }
}

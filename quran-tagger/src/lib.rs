//! Locate verbatim and elliptical Qur'ānic quotations inside Arabic prose.
//!
//! Given a Qur'ān source (`sura|verse|text` lines) and an ordered list
//! of input word tokens, [`Tagger::tag`] returns every span of the
//! input that quotes the Qur'ān, verbatim or through one of the
//! classical abbreviating formulae ("... until His saying ...", "...
//! to its end", and the like), paired with the Qur'ān span(s) it
//! quotes.
//!
//! # Examples
//!
//! ```
//! use quran_tagger::{QuranIndex, Tagger, TaggerOptions};
//!
//! let index = QuranIndex::build("112|1|قل هو الله أحد\n112|2|الله الصمد\n").unwrap();
//! let tagger = Tagger::new(index).with_options(TaggerOptions { min_tokens: 4, ..TaggerOptions::default() });
//!
//! let words: Vec<String> = "أما سمعت قوله قل هو الله أحد"
//!     .split_whitespace()
//!     .map(String::from)
//!     .collect();
//! let matches = tagger.tag(&words).unwrap();
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].spans[0].qref_start.sura, 112);
//! ```

mod chain;
mod ellipsis;
mod emit;
mod equality;
mod error;
mod index;
mod normalize;
mod rasm;
mod resolve;
mod stopwords;
mod types;

use std::collections::HashSet;

pub use error::{Result, TaggerError};
pub use types::{Candidate, Chain, Match, QRef, QuranIndex, QuranSpan, TaggerOptions, Token};

/// Loads a stopword set from a JSON array of surface forms.
pub fn load_stopwords(data: &str) -> serde_json::Result<HashSet<String>> {
    stopwords::load_json(data)
}

/// Derives a stopword set from a POS-tagged Qur'ān corpus. See
/// [`stopwords::derive_from_pos_tagged`].
pub fn derive_stopwords(data: &str) -> serde_json::Result<HashSet<String>> {
    stopwords::derive_from_pos_tagged(data)
}

/// Normalises one word the same way the tagger normalises its own
/// input and the Qur'ān text it was built from.
pub fn normalise(word: &str) -> String {
    normalize::normalise(word)
}

/// Encodes a normalised word to its archigrapheme ("rasm") skeleton.
pub fn rasm(normalised: &str) -> String {
    rasm::rasm(normalised)
}

/// A configured tagger over one [`QuranIndex`].
///
/// Cheap to construct repeatedly against the same index: all the
/// expensive state (`qtext`, `qrasm`, `sura_names`) lives in the index
/// and is only ever read. `Tagger::tag` is the sole entry point and is
/// a pure function of its input word list plus this configuration.
pub struct Tagger {
    index: QuranIndex,
    stopwords: HashSet<String>,
    options: TaggerOptions,
}

impl Tagger {
    /// Creates a tagger with default [`TaggerOptions`] and no
    /// stopwords (the common-word filter is a no-op until
    /// [`Tagger::with_stopwords`] supplies one).
    pub fn new(index: QuranIndex) -> Self {
        Tagger { index, stopwords: HashSet::new(), options: TaggerOptions::default() }
    }

    /// Replaces this tagger's options.
    pub fn with_options(mut self, options: TaggerOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces this tagger's stopword set.
    pub fn with_stopwords(mut self, stopwords: HashSet<String>) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// The Qur'ān index this tagger searches against.
    pub fn index(&self) -> &QuranIndex {
        &self.index
    }

    /// Tags an ordered list of Arabic-script word tokens, returning
    /// every match in ascending text-start order.
    ///
    /// The only failure mode is a misconfigured `min_tokens <= 0`;
    /// anything else about the input — empty, non-Arabic, shorter than
    /// `min_tokens` — yields a (possibly empty) result rather than an
    /// error.
    pub fn tag(&self, words: &[String]) -> Result<Vec<Match>> {
        let tokens: Vec<Token> = words.iter().map(|w| Token::new(w)).collect();
        emit::run(&tokens, &self.index, &self.stopwords, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn tags_an_exact_quotation_of_al_ikhlas() {
        let index = QuranIndex::build("112|1|قُلْ هُوَ اللَّهُ أَحَدٌ\n112|2|اللَّهُ الصَّمَدُ\n").unwrap();
        let tagger = Tagger::new(index).with_options(TaggerOptions { min_tokens: 4, ..TaggerOptions::default() });
        let matches = tagger.tag(&words("قل هو الله أحد")).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].spans[0].qref_start, QRef { sura: 112, verse: 1, word: 1 });
    }

    #[test]
    fn min_tokens_zero_is_a_configuration_error() {
        let index = QuranIndex::build("112|1|قل هو الله أحد\n").unwrap();
        let tagger = Tagger::new(index).with_options(TaggerOptions { min_tokens: 0, ..TaggerOptions::default() });
        let err = tagger.tag(&words("قل هو")).unwrap_err();
        assert!(matches!(err, TaggerError::IllogicalTokenCount(0)));
    }

    #[test]
    fn input_shorter_than_min_tokens_is_an_empty_result_not_an_error() {
        let index = QuranIndex::build("112|1|قل هو الله أحد\n").unwrap();
        let tagger = Tagger::new(index);
        let matches = tagger.tag(&words("قل هو")).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn loads_stopwords_from_json_and_filters_short_common_chains() {
        let index = QuranIndex::build("2|255|الله لا اله الا هو\n").unwrap();
        let stopwords = load_stopwords(r#"["لا", "الا", "هو"]"#).unwrap();
        let tagger = Tagger::new(index)
            .with_stopwords(stopwords)
            .with_options(TaggerOptions { min_tokens: 3, min_uncommon: 2, safe_length: 10, include_ellipses: false, ..TaggerOptions::default() });
        let matches = tagger.tag(&words("لا اله الا هو")).unwrap();
        assert!(matches.is_empty());
    }
}

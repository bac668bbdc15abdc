//! C8 — orchestration and result emission.
//!
//! Wires chain search (C4) through endpoint resolution (C5), the
//! vowel-tolerant re-check (C6), and ellipsis expansion (C7) into the
//! final, ordered sequence of matches.

use std::collections::{HashMap, HashSet};

use crate::chain;
use crate::ellipsis::{self, Target};
use crate::equality;
use crate::error::Result;
use crate::resolve::{self, Resolved};
use crate::types::{Match, QRef, QuranIndex, QuranSpan, TaggerOptions, Token};

/// How far past a recognised ellipsis formula to look for a
/// continuation, either among already-surviving matches or via the
/// bounded recursive sub-call.
const CONTINUATION_WINDOW: usize = 10;

fn span_for(index: &QuranIndex, q_start: usize, len: usize) -> QuranSpan {
    let q_end = q_start + len - 1;
    QuranSpan {
        qref_start: index.qtext[q_start].0,
        qref_end: index.qtext[q_end].0,
        q_start,
        q_end,
    }
}

fn sura_of(index: &QuranIndex, q: usize) -> u16 {
    index.qtext[q].0.sura
}

fn phrase(tokens: &[&str]) -> String {
    tokens.join(" ")
}

/// C6 — keeps only the `q_start`s of a resolved chain that are
/// vowel-tolerant-equal to the text span, or all of them when
/// `rasm_match` bypasses the check. Drops the chain entirely if none
/// survive.
fn verify_equality(
    resolved: HashMap<usize, Resolved>,
    words: &[Token],
    index: &QuranIndex,
    rasm_match: bool,
) -> HashMap<usize, Match> {
    let mut out = HashMap::new();
    for (endpoint, r) in resolved {
        let len = r.text_end - r.text_start + 1;
        let text_words: Vec<&str> = words[r.text_start..=r.text_end].iter().map(|t| t.normalised.as_str()).collect();
        let text_phrase = phrase(&text_words);

        let mut spans: Vec<QuranSpan> = r
            .q_starts
            .into_iter()
            .filter(|&q| {
                if rasm_match {
                    return true;
                }
                let quran_words: Vec<&str> = index.qtext[q..q + len].iter().map(|(_, t)| t.normalised.as_str()).collect();
                equality::equal(&text_phrase, &phrase(&quran_words))
            })
            .map(|q| span_for(index, q, len))
            .collect();
        spans.sort_by_key(|s| s.q_start);

        if !spans.is_empty() {
            out.insert(endpoint, Match { text_start: r.text_start, text_end: r.text_end, spans });
        }
    }
    out
}

/// C7 — for every surviving match, looks for a recognised ellipsis
/// formula right after it and, when found, expands or merges the
/// match per its target.
fn apply_ellipses(
    mut matches: HashMap<usize, Match>,
    words: &[Token],
    index: &QuranIndex,
    stopwords: &HashSet<String>,
    options: &TaggerOptions,
) -> Result<HashMap<usize, Match>> {
    let mut endpoints: Vec<usize> = matches.keys().copied().collect();
    endpoints.sort_unstable();

    for endpoint in endpoints {
        let Some(m) = matches.get(&endpoint).cloned() else { continue };
        let Some(em) = ellipsis::check(words, index, m.text_end + 1) else { continue };

        let expanded = match em.target {
            Target::EndOfSura => {
                let spans = m
                    .spans
                    .iter()
                    .map(|s| {
                        let q_end = ellipsis::end_of_sura(index, s.q_end);
                        QuranSpan { qref_end: index.qtext[q_end].0, q_end, ..*s }
                    })
                    .collect();
                Some(Match { text_start: m.text_start, text_end: m.text_end + em.tokens, spans })
            }
            Target::EndOfVerse => {
                let spans = m
                    .spans
                    .iter()
                    .map(|s| {
                        let q_end = ellipsis::end_of_verse(index, s.q_end);
                        QuranSpan { qref_end: index.qtext[q_end].0, q_end, ..*s }
                    })
                    .collect();
                Some(Match { text_start: m.text_start, text_end: m.text_end + em.tokens, spans })
            }
            Target::NamedSura { end_q } => {
                let spans = m
                    .spans
                    .iter()
                    .map(|s| QuranSpan { qref_end: index.qtext[end_q].0, q_end: end_q, ..*s })
                    .collect();
                Some(Match { text_start: m.text_start, text_end: m.text_end + em.tokens, spans })
            }
            Target::Continuation => {
                find_continuation(&matches, words, index, stopwords, options, &m, em.tokens)?
            }
        };

        let Some(expanded) = expanded else { continue };

        // Drop any other surviving match now swallowed by the expansion.
        matches.retain(|&_, other| {
            other.text_start <= m.text_start
                || other.text_start > expanded.text_end
        });
        matches.insert(endpoint, expanded);
    }

    Ok(matches)
}

/// Looks for a continuation of `m` after its `ila qawl(ihi) ...`
/// formula, either among already-surviving matches within
/// [`CONTINUATION_WINDOW`] tokens, or via a bounded recursive sub-call
/// over that window.
fn find_continuation(
    matches: &HashMap<usize, Match>,
    words: &[Token],
    index: &QuranIndex,
    stopwords: &HashSet<String>,
    options: &TaggerOptions,
    m: &Match,
    formula_tokens: usize,
) -> Result<Option<Match>> {
    let Some(m_span) = m.spans.first() else { return Ok(None) };
    let window_start = m.text_end + 1 + formula_tokens;
    let window_end = (window_start + CONTINUATION_WINDOW).min(words.len());
    if window_start >= words.len() {
        return Ok(None);
    }

    let candidate = matches
        .values()
        .filter(|other| other.text_start >= window_start && other.text_start < window_start + CONTINUATION_WINDOW)
        .filter(|other| other.spans.iter().any(|s| sura_of(index, s.q_start) == sura_of(index, m_span.q_start)))
        .max_by_key(|other| other.text_end);

    if let Some(found) = candidate {
        let Some(found_span) = found.spans.iter().find(|s| sura_of(index, s.q_start) == sura_of(index, m_span.q_start)) else {
            return Ok(None);
        };
        let merged_span = QuranSpan {
            qref_start: m_span.qref_start,
            qref_end: found_span.qref_end,
            q_start: m_span.q_start,
            q_end: found_span.q_end,
        };
        return Ok(Some(Match { text_start: m.text_start, text_end: found.text_end, spans: vec![merged_span] }));
    }

    let sub_words = &words[window_start..window_end];
    let sub_options = TaggerOptions {
        min_tokens: 1,
        min_uncommon: 0,
        include_ellipses: false,
        rasm_match: options.rasm_match,
        safe_length: options.safe_length,
    };
    let sub_matches = run(sub_words, index, stopwords, &sub_options)?;
    let Some(sub) = sub_matches.into_iter().find(|r| r.text_start == 0) else {
        return Ok(None);
    };
    let Some(sub_span) = sub.spans.into_iter().find(|s| sura_of(index, s.q_start) == sura_of(index, m_span.q_start)) else {
        return Ok(None);
    };

    let merged_span = QuranSpan {
        qref_start: m_span.qref_start,
        qref_end: sub_span.qref_end,
        q_start: m_span.q_start,
        q_end: sub_span.q_end,
    };
    Ok(Some(Match {
        text_start: m.text_start,
        text_end: window_start + sub.text_end,
        spans: vec![merged_span],
    }))
}

/// Runs the full C4→C8 pipeline over an already-tokenised slice of
/// words, returning matches in ascending text-start order.
pub fn run(words: &[Token], index: &QuranIndex, stopwords: &HashSet<String>, options: &TaggerOptions) -> Result<Vec<Match>> {
    let end_of_chains = chain::search(words, index, options.min_tokens)?;
    let resolved = resolve::resolve(&end_of_chains, words, stopwords, options.min_uncommon, options.safe_length);
    let verified = verify_equality(resolved, words, index, options.rasm_match);
    let final_matches = if options.include_ellipses {
        apply_ellipses(verified, words, index, stopwords, options)?
    } else {
        verified
    };

    let mut out: Vec<Match> = final_matches.into_values().collect();
    out.sort_by_key(|m| m.text_start);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index;
    use pretty_assertions::assert_eq;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| Token::new(w)).collect()
    }

    fn al_ikhlas_index() -> QuranIndex {
        index::build(
            "112|1|قُلْ هُوَ اللَّهُ أَحَدٌ\n\
             112|2|اللَّهُ الصَّمَدُ\n\
             112|3|لَمْ يَلِدْ وَلَمْ يُولَدْ\n\
             112|4|وَلَمْ يَكُن لَّهُ كُفُوًا أَحَدٌ\n",
        )
        .unwrap()
    }

    #[test]
    fn finds_an_exact_quotation() {
        let index = al_ikhlas_index();
        let stopwords = HashSet::new();
        let words = tokens(&["قل", "هو", "الله", "أحد"]);
        let options = TaggerOptions { min_tokens: 4, include_ellipses: false, ..TaggerOptions::default() };
        let matches = run(&words, &index, &stopwords, &options).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text_start, 0);
        assert_eq!(matches[0].text_end, 3);
        assert_eq!(matches[0].spans[0].qref_start, QRef { sura: 112, verse: 1, word: 1 });
    }

    #[test]
    fn drops_a_vowel_mismatching_candidate_unless_rasm_match() {
        let index = al_ikhlas_index();
        let stopwords = HashSet::new();
        // "قَل" (fatha) never occurs in the Qur'an; rasm matches "قُل" but
        // the explicit vowel differs, so C6 should reject it.
        let words = tokens(&["قَل", "هو", "الله", "أحد"]);
        let options = TaggerOptions { min_tokens: 4, include_ellipses: false, ..TaggerOptions::default() };
        let matches = run(&words, &index, &stopwords, &options).unwrap();
        assert!(matches.is_empty());

        let rasm_only = TaggerOptions { min_tokens: 4, include_ellipses: false, rasm_match: true, ..TaggerOptions::default() };
        let matches = run(&words, &index, &stopwords, &rasm_only).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn expands_an_ellipsis_to_the_end_of_the_sura() {
        let index = al_ikhlas_index();
        let stopwords = HashSet::new();
        let words = tokens(&["قل", "هو", "الله", "أحد", "إلى", "آخرها"]);
        let options = TaggerOptions { min_tokens: 4, include_ellipses: true, ..TaggerOptions::default() };
        let matches = run(&words, &index, &stopwords, &options).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text_end, 5);
        assert_eq!(matches[0].spans[0].qref_end, QRef { sura: 112, verse: 4, word: 5 });
    }

    #[test]
    fn leaves_the_match_unexpanded_when_no_continuation_is_found() {
        let index = al_ikhlas_index();
        let stopwords = HashSet::new();
        let words = tokens(&["قل", "هو", "الله", "أحد", "إلى", "قوله", "كلام", "غريب"]);
        let options = TaggerOptions { min_tokens: 4, include_ellipses: true, ..TaggerOptions::default() };
        let matches = run(&words, &index, &stopwords, &options).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text_end, 3);
    }

    #[test]
    fn ambiguous_spans_are_yielded_in_increasing_q_start_order() {
        // The same four-word phrase occurs twice, in sura 50 (listed first in
        // the source, so its tokens get the lower offsets) and sura 2 -- the
        // surviving chain is ambiguous between two Qur'an passages, and the
        // lower q_start must come first regardless of the HashSet iteration
        // order `chain::search` draws its candidates from.
        let index = index::build("50|1|قل هو الله أحد\n2|1|قل هو الله أحد\n").unwrap();
        let stopwords = HashSet::new();
        let words = tokens(&["قل", "هو", "الله", "أحد"]);
        let options = TaggerOptions { min_tokens: 4, include_ellipses: false, ..TaggerOptions::default() };
        let matches = run(&words, &index, &stopwords, &options).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].spans.len(), 2);
        assert!(matches[0].spans.windows(2).all(|w| w[0].q_start < w[1].q_start));
        assert_eq!(matches[0].spans[0].qref_start, QRef { sura: 50, verse: 1, word: 1 });
        assert_eq!(matches[0].spans[1].qref_start, QRef { sura: 2, verse: 1, word: 1 });
    }

    #[test]
    fn rejects_a_short_all_stopword_chain() {
        let index = al_ikhlas_index();
        let words = tokens(&["قل", "هو", "الله"]);
        let stopwords: HashSet<String> = words.iter().map(|w| w.rasm.clone()).collect();
        let options = TaggerOptions { min_tokens: 3, min_uncommon: 1, safe_length: 4, include_ellipses: false, ..TaggerOptions::default() };
        let matches = run(&words, &index, &stopwords, &options).unwrap();
        assert!(matches.is_empty());
    }
}

//! C5 — endpoint resolution: keep the longest chain per endpoint, drop
//! overlaps, and drop short chains that are (almost) entirely common
//! words.

use std::collections::{HashMap, HashSet};

use crate::chain::EndOfChains;
use crate::types::Token;

/// One surviving chain after stage A: an endpoint's longest length and
/// every `(text_start, q_start)` pair achieving it.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub text_start: usize,
    pub text_end: usize,
    pub q_starts: Vec<usize>,
}

/// Stage A — for each endpoint, keep only the bucket with the maximum
/// length; every `(text_start, q_start)` pair in that bucket shares the
/// same `text_start` since `text_start = endpoint - length + 1`.
fn keep_longest(end_of_chains: &EndOfChains) -> HashMap<usize, Resolved> {
    end_of_chains
        .iter()
        .map(|(&endpoint, by_len)| {
            let &max_len = by_len.keys().max().expect("non-empty bucket");
            let starts = &by_len[&max_len];
            let text_start = starts.first().map(|&(i, _)| i).unwrap_or(endpoint + 1 - max_len);
            let q_starts = starts.iter().map(|&(_, q)| q).collect();
            (endpoint, Resolved { text_start, text_end: endpoint, q_starts })
        })
        .collect()
}

/// Stage B — remove overlapping chains, scanning endpoints in ascending
/// order and keeping a running list of disjoint survivors. Ties at
/// equal length keep the earlier-ending chain and emit a `tracing::warn!`;
/// this is a deliberate tie-break, not incidental behaviour.
fn remove_overlaps(mut by_endpoint: HashMap<usize, Resolved>) -> HashMap<usize, Resolved> {
    let mut endpoints: Vec<usize> = by_endpoint.keys().copied().collect();
    endpoints.sort_unstable();

    let mut kept: Vec<usize> = Vec::new();
    for endpoint in endpoints {
        let Some(candidate) = by_endpoint.get(&endpoint) else { continue };
        let i = candidate.text_start;

        match kept.last().copied() {
            None => kept.push(endpoint),
            Some(prev_endpoint) => {
                let prev = &by_endpoint[&prev_endpoint];
                if prev_endpoint < i {
                    kept.push(endpoint);
                } else {
                    let new_len = endpoint - i + 1;
                    let prev_len = prev_endpoint - prev.text_start + 1;
                    match new_len.cmp(&prev_len) {
                        std::cmp::Ordering::Greater => {
                            kept.pop();
                            by_endpoint.remove(&prev_endpoint);
                            kept.push(endpoint);
                        }
                        std::cmp::Ordering::Less => {
                            by_endpoint.remove(&endpoint);
                        }
                        std::cmp::Ordering::Equal => {
                            tracing::warn!(
                                prev_start = prev.text_start,
                                prev_end = prev_endpoint,
                                new_start = i,
                                new_end = endpoint,
                                "overlapping Qur'an quotations of equal length; keeping the earlier one"
                            );
                            by_endpoint.remove(&endpoint);
                        }
                    }
                }
            }
        }
    }

    kept.into_iter().filter_map(|e| by_endpoint.remove(&e).map(|r| (e, r))).collect()
}

/// Stage C — drop chains shorter than `safe_length` whose count of
/// non-stopword tokens is below `min_uncommon`. No-op when
/// `min_uncommon == 0`.
fn remove_common_only(
    by_endpoint: HashMap<usize, Resolved>,
    words: &[Token],
    stopwords: &HashSet<String>,
    min_uncommon: usize,
    safe_length: usize,
) -> HashMap<usize, Resolved> {
    if min_uncommon == 0 {
        return by_endpoint;
    }
    by_endpoint
        .into_iter()
        .filter(|(_, r)| {
            let len = r.text_end - r.text_start + 1;
            if len >= safe_length {
                return true;
            }
            let uncommon = words[r.text_start..=r.text_end]
                .iter()
                .filter(|w| !stopwords.contains(&w.rasm))
                .count();
            uncommon >= min_uncommon
        })
        .collect()
}

/// Runs stages A–C, returning surviving chains keyed by endpoint.
pub fn resolve(
    end_of_chains: &EndOfChains,
    words: &[Token],
    stopwords: &HashSet<String>,
    min_uncommon: usize,
    safe_length: usize,
) -> HashMap<usize, Resolved> {
    let longest = keep_longest(end_of_chains);
    let disjoint = remove_overlaps(longest);
    remove_common_only(disjoint, words, stopwords, min_uncommon, safe_length)
}

//! C4 — chain-extension search.
//!
//! For every text position, extends each co-occurring rasm chain
//! against the Qur'ān index as far as it will go, recording every chain
//! at least `min_tokens` long, keyed by its endpoint and length.

use std::collections::HashMap;

use crate::error::{Result, TaggerError};
use crate::types::{QuranIndex, Token};

/// `end_of_chains[endpoint][length]` is every `(text_start, q_start)`
/// pair whose chain is `length` tokens long and ends at `endpoint`.
pub type EndOfChains = HashMap<usize, HashMap<usize, Vec<(usize, usize)>>>;

/// Builds `end_of_chains` for `words` against `index`.
///
/// Fails if `min_tokens <= 0` — an impossible match length, a caller
/// bug rather than a property of the input text.
pub fn search(words: &[Token], index: &QuranIndex, min_tokens: i64) -> Result<EndOfChains> {
    if min_tokens <= 0 {
        return Err(TaggerError::IllogicalTokenCount(min_tokens));
    }
    let min_tokens = min_tokens as usize;
    let n = words.len();
    let mut end_of_chains: EndOfChains = HashMap::new();

    if n < min_tokens {
        return Ok(end_of_chains);
    }

    for i in 0..=(n - min_tokens) {
        let Some(starts) = index.qrasm.get(&words[i].rasm) else {
            continue;
        };
        for &q in starts {
            let mut j = 0usize;
            loop {
                j += 1;
                if i + j >= n {
                    break;
                }
                let extends = index
                    .qrasm
                    .get(&words[i + j].rasm)
                    .is_some_and(|ids| ids.contains(&(q + j)));
                if !extends {
                    break;
                }
            }
            let len = j;
            if len >= min_tokens {
                let endpoint = i + len - 1;
                end_of_chains
                    .entry(endpoint)
                    .or_default()
                    .entry(len)
                    .or_default()
                    .push((i, q));
            }
        }
    }

    Ok(end_of_chains)
}

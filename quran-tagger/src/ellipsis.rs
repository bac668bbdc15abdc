//! C7 — ellipsis recogniser.
//!
//! Looks at the tokens immediately after a surviving match and decides
//! whether they are one of the recognised abbreviating formulae
//! ("... to the end of it", "... until His saying ...", "etc."). When
//! one is recognised, it reports how many trailing tokens the formula
//! consumes and what it means for expansion (`expand.rs` does the
//! actual span widening).

use crate::types::{QuranIndex, Token};

fn word_rasm(s: &str) -> String {
    crate::rasm::rasm(&crate::normalize::normalise(s))
}

fn at(words: &[Token], i: usize) -> Option<&str> {
    words.get(i).map(|t| t.rasm.as_str())
}

fn is_one_of(rasm: &str, forms: &[&str]) -> bool {
    forms.iter().any(|f| rasm == word_rasm(f))
}

/// What the recognised formula says to do with the match it follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Extend to the last token of the match's own verse.
    EndOfVerse,
    /// Extend to the last token of the match's own sura.
    EndOfSura,
    /// Extend to the last token of a specifically named sura.
    NamedSura { end_q: usize },
    /// Look for a continuation match after the formula ("ila qawlihi ...").
    Continuation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EllipsisMatch {
    pub target: Target,
    /// Number of trailing text tokens the formula itself consumes.
    pub tokens: usize,
}

/// Looks up a one- or two-token sura name (bare, or after `سورة`)
/// starting at `i`. Two-token names are tried first so e.g. `آل عمران`
/// isn't mistaken for a one-token match on `آل`.
fn match_sura_name(words: &[Token], index: &QuranIndex, i: usize) -> Option<(usize, (usize, usize))> {
    if let (Some(a), Some(b)) = (words.get(i), words.get(i + 1)) {
        let joined = format!("{} {}", a.normalised, b.normalised);
        if let Some(&range) = index.sura_names.get(&joined) {
            return Some((2, range));
        }
    }
    if let Some(a) = words.get(i) {
        if let Some(&range) = index.sura_names.get(&a.normalised) {
            return Some((1, range));
        }
    }
    None
}

fn last_token_of_sura(index: &QuranIndex, q_end: usize) -> usize {
    let sura = index.qtext[q_end].0.sura;
    let mut end = q_end;
    while end + 1 < index.qtext.len() && index.qtext[end + 1].0.sura == sura {
        end += 1;
    }
    end
}

/// Family 1 — simple tail markers. A bare "الآية"/"السورة" mention on
/// its own is just prose; it only signals ellipsis when paired with
/// `كلها`, or with the compound "إلى آخر الآيات" ("to the end of the
/// verses", i.e. end of sura).
fn try_simple_tail(words: &[Token], i: usize) -> Option<EllipsisMatch> {
    let w0 = at(words, i)?;
    let is_aya = is_one_of(w0, &["الآية", "الآيات", "الآيتين"]);
    let is_sura = is_one_of(w0, &["السورة"]);
    if !is_aya && !is_sura {
        return None;
    }

    if is_one_of(at(words, i + 1)?, &["كلها"]) {
        let target = if is_sura { Target::EndOfSura } else { Target::EndOfVerse };
        return Some(EllipsisMatch { target, tokens: 2 });
    }

    if is_aya
        && is_one_of(at(words, i + 1)?, &["إلى"])
        && is_one_of(at(words, i + 2)?, &["آخر"])
        && is_one_of(at(words, i + 3)?, &["الآيات"])
    {
        return Some(EllipsisMatch { target: Target::EndOfSura, tokens: 4 });
    }

    None
}

/// Family 2 — `ila/hatta + end-noun` (`آخر`/`تمام`/`خاتمة`, optionally
/// possessive, optionally qualified by a sura/verse marker or name).
fn try_end_noun(words: &[Token], index: &QuranIndex, i: usize) -> Option<EllipsisMatch> {
    let starter = at(words, i)?;
    if !is_one_of(starter, &["إلى", "حتى"]) {
        return None;
    }
    let mut tokens = 1;

    let noun = at(words, i + tokens)?;
    let (noun_has_ha, bare_noun) = if is_one_of(noun, &["آخرها", "تمامها", "خاتمتها"]) {
        (true, false)
    } else if is_one_of(noun, &["آخر", "تمام", "خاتمة"]) {
        (false, true)
    } else {
        return None;
    };
    tokens += 1;
    let mut has_ha = noun_has_ha;
    if bare_noun {
        if let Some(next) = at(words, i + tokens) {
            if is_one_of(next, &["ها"]) {
                has_ha = true;
                tokens += 1;
            }
        }
    }

    if let Some(next) = at(words, i + tokens) {
        if is_one_of(next, &["السورة"]) {
            tokens += 1;
            if let Some(after) = at(words, i + tokens) {
                if is_one_of(after, &["كلها"]) {
                    tokens += 1;
                }
            }
            return Some(EllipsisMatch { target: Target::EndOfSura, tokens });
        }
        if is_one_of(next, &["الآية"]) {
            tokens += 1;
            if let Some(after) = at(words, i + tokens) {
                if is_one_of(after, &["كلها"]) {
                    tokens += 1;
                }
            }
            return Some(EllipsisMatch { target: Target::EndOfVerse, tokens });
        }
        if is_one_of(next, &["سورة"]) {
            if let Some((name_len, range)) = match_sura_name(words, index, i + tokens + 1) {
                tokens += 1 + name_len;
                return Some(EllipsisMatch { target: Target::NamedSura { end_q: range.1 }, tokens });
            }
        }
        if let Some((name_len, range)) = match_sura_name(words, index, i + tokens) {
            tokens += name_len;
            return Some(EllipsisMatch { target: Target::NamedSura { end_q: range.1 }, tokens });
        }
    }

    // Bare "ila/hatta akhir(ha)" with no further qualifier: the
    // possessive form ("its end") is most often used of the current
    // sura ("... wa tabba. ila akhiriha"); default both cases the same
    // way for consistency.
    let _ = has_ha;
    Some(EllipsisMatch { target: Target::EndOfSura, tokens })
}

const END_VERBS_KHATM: &[&str] = &["ختم", "ختمت", "تختم", "انقضت", "تنقضي", "أتم"];
const END_VERBS_FARAGH: &[&str] = &["فرغ", "فرغت", "يفرغ"];

/// Family 3 — `ila an/hatta + end-verb`, optionally `idha`, optionally
/// qualified by `min (al-sura/al-aya)` or `minha`.
fn try_end_verb(words: &[Token], i: usize) -> Option<EllipsisMatch> {
    let mut tokens = 0;
    if is_one_of(at(words, i)?, &["إلى"]) && is_one_of(at(words, i + 1)?, &["أن"]) {
        tokens = 2;
    } else if is_one_of(at(words, i)?, &["حتى"]) {
        tokens = 1;
    } else {
        return None;
    }

    if let Some(next) = at(words, i + tokens) {
        if is_one_of(next, &["إذا"]) {
            tokens += 1;
        }
    }

    let verb = at(words, i + tokens)?;
    if !is_one_of(verb, END_VERBS_KHATM) && !is_one_of(verb, END_VERBS_FARAGH) {
        return None;
    }
    tokens += 1;

    let mut target = Target::EndOfSura;
    if let Some(next) = at(words, i + tokens) {
        if is_one_of(next, &["منها"]) {
            tokens += 1;
        } else if is_one_of(next, &["من"]) {
            tokens += 1;
            if let Some(after) = at(words, i + tokens) {
                if is_one_of(after, &["السورة"]) {
                    target = Target::EndOfSura;
                    tokens += 1;
                } else if is_one_of(after, &["الآية"]) {
                    target = Target::EndOfVerse;
                    tokens += 1;
                }
            }
        }
    }
    Some(EllipsisMatch { target, tokens })
}

const REACH_VERBS_ILA: &[&str] = &["انتهى", "انتهت", "بلغ", "بلغت"];
const REACH_VERBS_ALA: &[&str] = &["أتى", "أتيت", "يأتي"];

/// Family 4 — reach-verbs (`انتهى`/`بلغ` + `إلى`, or `أتى` + `على`),
/// optionally trailing `الآية`.
fn try_reach_verb(words: &[Token], i: usize) -> Option<EllipsisMatch> {
    let verb = at(words, i)?;
    let mut tokens = 1;
    if is_one_of(verb, REACH_VERBS_ILA) {
        if !is_one_of(at(words, i + tokens)?, &["إلى"]) {
            return None;
        }
        tokens += 1;
    } else if is_one_of(verb, REACH_VERBS_ALA) {
        if !is_one_of(at(words, i + tokens)?, &["على"]) {
            return None;
        }
        tokens += 1;
    } else {
        return None;
    }

    let mut target = Target::EndOfSura;
    if let Some(next) = at(words, i + tokens) {
        if is_one_of(next, &["الآية"]) {
            target = Target::EndOfVerse;
            tokens += 1;
        }
    }
    Some(EllipsisMatch { target, tokens })
}

const SPEECH_VERBS: &[&str] = &["قال", "قالت", "قلت", "قرأ", "قرأت"];
const GOD_EPITHETS: &[&str] = &["تعالى", "سبحانه", "عز", "جل", "تبارك", "الله"];
const GOD_ATTRIBUTES: &[&str] = &["ذكره", "شأنه", "اسمه"];

/// Family 5 — speech-verbs, optionally followed by divine epithets and
/// their waw-prefixed/attribute forms.
fn try_speech_verb(words: &[Token], i: usize) -> Option<EllipsisMatch> {
    let mut tokens = 0;
    if is_one_of(at(words, i)?, &["إلى", "حتى"]) {
        tokens = 1;
    }
    let verb = at(words, i + tokens)?;
    if !is_one_of(verb, SPEECH_VERBS) {
        return None;
    }
    tokens += 1;

    loop {
        let Some(next) = at(words, i + tokens) else { break };
        let is_epithet = is_one_of(next, GOD_EPITHETS)
            || is_one_of(next, &["وتعالى", "وسبحانه", "وعز", "وجل", "وتبارك", "والله"]);
        let is_attribute = is_one_of(next, GOD_ATTRIBUTES);
        if is_epithet || is_attribute {
            tokens += 1;
        } else {
            break;
        }
    }
    Some(EllipsisMatch { target: Target::Continuation, tokens })
}

/// Family 6 — "ila qawl(ihi) [tacala] [God epithets ...]" — "until His
/// saying ...". Always signals a continuation search.
fn try_qawl(words: &[Token], i: usize) -> Option<EllipsisMatch> {
    if !is_one_of(at(words, i)?, &["إلى"]) {
        return None;
    }
    let qawl = at(words, i + 1)?;
    let qawl_stem = word_rasm("قول");
    if !qawl.starts_with(&qawl_stem) {
        return None;
    }
    let mut tokens = 2;
    loop {
        let Some(next) = at(words, i + tokens) else { break };
        let is_epithet = is_one_of(next, GOD_EPITHETS)
            || is_one_of(next, &["وتعالى", "وسبحانه", "وعز", "وجل", "وتبارك", "والله"]);
        let is_attribute = is_one_of(next, GOD_ATTRIBUTES);
        if is_epithet || is_attribute {
            tokens += 1;
        } else {
            break;
        }
    }
    Some(EllipsisMatch { target: Target::Continuation, tokens })
}

/// Family 7 — the bare abbreviation `الخ`, equivalent to "until its end".
fn try_abbreviation(words: &[Token], i: usize) -> Option<EllipsisMatch> {
    let w = at(words, i)?;
    if is_one_of(w, &["الخ"]) {
        Some(EllipsisMatch { target: Target::EndOfSura, tokens: 1 })
    } else {
        None
    }
}

/// Tries every recognised family in turn, returning the first match.
pub fn check(words: &[Token], index: &QuranIndex, i: usize) -> Option<EllipsisMatch> {
    try_simple_tail(words, i)
        .or_else(|| try_end_noun(words, index, i))
        .or_else(|| try_end_verb(words, i))
        .or_else(|| try_reach_verb(words, i))
        .or_else(|| try_speech_verb(words, i))
        .or_else(|| try_qawl(words, i))
        .or_else(|| try_abbreviation(words, i))
}

/// Scans forward from `q_end` to the last token of its sura or verse.
pub fn end_of_sura(index: &QuranIndex, q_end: usize) -> usize {
    last_token_of_sura(index, q_end)
}

/// Scans forward from `q_end` to the last token of its verse.
pub fn end_of_verse(index: &QuranIndex, q_end: usize) -> usize {
    let qref = index.qtext[q_end].0;
    let mut end = q_end;
    while end + 1 < index.qtext.len()
        && index.qtext[end + 1].0.sura == qref.sura
        && index.qtext[end + 1].0.verse == qref.verse
    {
        end += 1;
    }
    end
}

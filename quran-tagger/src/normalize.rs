//! C1 — script normaliser.
//!
//! Folds Arabic letter-form variants to a canonical alphabet, strips
//! everything outside that alphabet, optionally drops a leading
//! conjunction letter, and elides every `ا`. Normalisation is total:
//! every `&str` input produces a `String`, never an error.

/// Short vowel and tanwin marks that survive cleaning. Everything else
/// outside the rasm alphabet — shadda, sukun, superscript alif, tatweel,
/// punctuation, digits — is deleted by cleaning.
pub const VOWELS: [char; 6] = ['\u{064B}', '\u{064C}', '\u{064D}', '\u{064E}', '\u{064F}', '\u{0650}'];

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Folds one source character to its canonical replacement, or `None` if
/// it isn't in the fold table.
fn fold(c: char) -> Option<char> {
    match c {
        'ة' | 'ہ' | 'ھ' | 'ﻫ' => Some('ه'),
        'إ' | 'أ' | 'آ' | 'ٱ' => Some('ا'),
        'ؤ' => Some('و'),
        'ٮ' | 'ى' | 'ي' | 'ئ' => Some('ی'),
        'ك' => Some('ک'),
        'ں' | 'ۨ' => Some('ن'),
        'ﺑ' => Some('ب'),
        'ﮐ' => Some('ک'),
        'ﻟ' => Some('ل'),
        _ => None,
    }
}

/// True for characters the cleaning pass keeps once folding is done: the
/// rasm alphabet, the vowel marks, and `ا` (kept through cleaning so a
/// folded hamza-alif and a bare alif are treated alike; both are removed
/// by the dedicated elision step below).
fn keep_after_fold(c: char) -> bool {
    is_vowel(c) || c == 'ا' || crate::rasm::GRAPHEMES.contains(c)
}

/// Normalise Arabic-scripted `s` to the canonical alphabet, with
/// conjunction stripping on (the tagger's default).
pub fn normalise(s: &str) -> String {
    normalise_with(s, true)
}

/// Like [`normalise`] but lets the caller disable conjunction stripping.
pub fn normalise_with(s: &str, rm_conj: bool) -> String {
    let cleaned: String = s
        .chars()
        .filter_map(|c| match fold(c) {
            Some(replacement) => Some(replacement),
            None if keep_after_fold(c) => Some(c),
            None => None,
        })
        .collect();

    let conj_stripped = if rm_conj {
        strip_conjunction(&cleaned)
    } else {
        cleaned
    };

    conj_stripped.chars().filter(|&c| c != 'ا').collect()
}

/// Drops a single leading `و`/`ف` when the cleaned result is longer than
/// one letter — it is likely a proclitic conjunction, not part of the
/// lemma.
fn strip_conjunction(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some('و' | 'ف') if s.chars().count() > 1 => chars.as_str().to_string(),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn folds_ta_marbuta_and_ha_variants() {
        assert_eq!(normalise("رحمة"), "رحمه");
    }

    #[test]
    fn folds_hamza_alif_variants_and_elides_alif() {
        assert_eq!(normalise("أحد"), "حد");
        assert_eq!(normalise("إحسان"), "حسان");
        assert_eq!(normalise("آخر"), "خر");
    }

    #[test]
    fn folds_kaf_and_ya_family() {
        assert_eq!(normalise("كبير"), "کبیر");
    }

    #[test]
    fn strips_waw_conjunction_on_long_word() {
        assert_eq!(normalise("والمستقيم"), "لمستقیم");
    }

    #[test]
    fn strips_fa_conjunction_on_long_word() {
        assert_eq!(normalise("فالكتاب"), "لکتب");
    }

    #[test]
    fn keeps_short_waw_initial_word_intact() {
        // "فی" ("in") is two letters post-clean; the conjunction guard
        // only fires when the cleaned result is longer than one letter,
        // so a two-letter و/ف-initial word is still eligible — this one
        // simply doesn't start with و/ف.
        assert_eq!(normalise("في"), "فی");
    }

    #[test]
    fn is_total_on_empty_and_latin_input() {
        assert_eq!(normalise(""), "");
        assert_eq!(normalise("abc123"), "");
    }

    #[test]
    fn retains_vowel_marks_for_vowel_tolerant_equality() {
        assert_eq!(normalise("بِسْمِ"), "بِسمِ");
    }

    #[test]
    fn strips_shadda_and_other_non_vowel_diacritics() {
        assert_eq!(normalise("الرَّحْمَـٰنِ"), "لرحمنِ");
    }
}

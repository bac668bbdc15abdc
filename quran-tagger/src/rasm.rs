//! C2 — archigrapheme ("rasm") encoder.
//!
//! Collapses a normalised string down to its consonant skeleton: every
//! dotted letter maps to the undotted archigrapheme it shares a rasm
//! with, except the three letters whose skeleton depends on whether they
//! close the word (`ق`, `ن`, `ی`).

/// The rasm alphabet as it appears on the input side — every letter
/// [`normalize`](crate::normalize) can hand to this module.
pub const GRAPHEMES: &str = "رزژدذڈوبکلتثپجحخځچسشصضطظعغڡفگمهقنی";

/// General (non-final-position) archigrapheme for one letter, or `None`
/// if it isn't part of the rasm alphabet.
fn general(c: char) -> Option<char> {
    match c {
        'ر' | 'ز' | 'ژ' => Some('R'),
        'د' | 'ذ' | 'ڈ' => Some('D'),
        'و' => Some('W'),
        'ب' | 'پ' | 'ت' | 'ث' => Some('B'),
        'ک' | 'گ' => Some('K'),
        'ل' => Some('L'),
        'ج' | 'ح' | 'خ' | 'ځ' | 'چ' => Some('G'),
        'س' | 'ش' => Some('S'),
        'ص' | 'ض' => Some('C'),
        'ط' | 'ظ' => Some('T'),
        'ع' | 'غ' => Some('E'),
        'ڡ' | 'ف' => Some('F'),
        'م' => Some('M'),
        'ه' => Some('H'),
        'ق' => Some('F'),
        'ن' => Some('B'),
        'ی' => Some('B'),
        _ => None,
    }
}

/// Word-final archigrapheme for the three position-sensitive letters
/// (`ق`, `ن`, `ی`); all other letters use [`general`] regardless of
/// position.
fn word_final(c: char) -> Option<char> {
    match c {
        'ق' => Some('Q'),
        'ن' => Some('N'),
        'ی' => Some('Y'),
        _ => general(c),
    }
}

/// Encodes a normalised string to its rasm. Characters outside the rasm
/// alphabet (stray vowels, anything [`normalize`](crate::normalize)
/// missed) are dropped rather than rejected — this module only ever
/// sees normalised text, so such characters mean "no rasm here", not an
/// error.
pub fn rasm(s: &str) -> String {
    let last_index = s.chars().filter(|&c| GRAPHEMES.contains(c)).count().saturating_sub(1);
    s.chars()
        .filter(|&c| GRAPHEMES.contains(c))
        .enumerate()
        .filter_map(|(i, c)| if i == last_index { word_final(c) } else { general(c) })
        .collect()
}

//! Integration tests for the concrete scenarios enumerated in `spec.md`
//! §8 — cross-module behaviour that doesn't belong to any single
//! component's unit tests.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use quran_tagger::{QRef, QuranIndex, Tagger, TaggerOptions};

fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

fn al_ankabut_19() -> QuranIndex {
    // A handful of Qur'an verses to search against, standing in for the
    // full corpus: what matters for these scenarios is the relative
    // positions and the quoted verse's exact token sequence, not
    // exhaustive coverage of the text.
    QuranIndex::build(
        "29|18|وإن تكذبوا فقد كذب أمم من قبلكم وما على الرسول إلا البلاغ المبين\n\
         29|19|أولم يروا كيف يبدئ الله الخلق ثم يعيده إن ذلك على الله يسير\n\
         29|20|قل سيروا في الأرض فانظروا كيف بدأ الخلق\n",
    )
    .unwrap()
}

/// Scenario 1 — exact quotation: tagging the seven words of Q 29:19
/// verbatim returns one match spanning the whole input.
#[test]
fn exact_quotation_of_a_full_verse() {
    let index = al_ankabut_19();
    let stopwords = HashSet::new();
    let input = words("أولم يروا كيف يبدئ الله الخلق ثم يعيده إن ذلك على الله يسير");
    let options = TaggerOptions { min_tokens: 5, include_ellipses: false, ..TaggerOptions::default() };

    let tagger = Tagger::new(index).with_stopwords(stopwords).with_options(options);
    let matches = tagger.tag(&input).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text_start, 0);
    assert_eq!(matches[0].text_end, input.len() - 1);
    assert_eq!(matches[0].spans[0].qref_start, QRef { sura: 29, verse: 19, word: 1 });
    assert_eq!(matches[0].spans[0].qref_end, QRef { sura: 29, verse: 19, word: 13 });
}

/// Scenario 2 — rasm-only match: a differently-vowelled spelling of a
/// Qur'anic phrase shares its rasm with the Qur'an surface but carries
/// an explicit vowel the Qur'an text doesn't have at that position;
/// `rasm_match=true` accepts it, the default C6 re-check rejects it.
#[test]
fn rasm_only_match_depends_on_rasm_match_flag() {
    let quran_source = "6|28|وَلَوْ رُدُّوا لَعَادُوا لِمَا نُهُوا عَنْهُ وَإِنَّهُمْ لَكَاذِبُونَ\n";
    let stopwords = HashSet::new();
    // "رُدّوا" respelled with a fatha where the Qur'an surface has none at
    // all ("رُدُّوا"): same rasm, incompatible vowelling.
    let input = words("رَدُّوا لَعَادُوا لِمَا نُهُوا");
    let options = TaggerOptions { min_tokens: 4, include_ellipses: false, ..TaggerOptions::default() };

    let strict = Tagger::new(QuranIndex::build(quran_source).unwrap())
        .with_stopwords(stopwords.clone())
        .with_options(options);
    assert!(strict.tag(&input).unwrap().is_empty());

    let rasm_only_options = TaggerOptions { rasm_match: true, ..options };
    let lenient = Tagger::new(QuranIndex::build(quran_source).unwrap())
        .with_stopwords(stopwords)
        .with_options(rasm_only_options);
    assert_eq!(lenient.tag(&input).unwrap().len(), 1);
}

/// Scenario 3 — overlap with a tie: two equal-length chains overlapping
/// at their boundary; the earlier-ending one survives.
#[test]
fn equal_length_overlap_keeps_the_earlier_ending_chain() {
    // Verse 1 is "قال ربنا إنا آمنا فاغفر" (q=0..4); verse 2 repeats its
    // last two words and continues differently: "آمنا فاغفر لنا ذنوبنا
    // وقنا" (q=5..9). Tagging the 8-word sequence "قال ربنا إنا آمنا
    // فاغفر لنا ذنوبنا وقنا" produces two length-5 chains: one anchored
    // at verse 1 ending at text offset 4, one anchored at verse 2's
    // repeated prefix ending at text offset 7 — overlapping at offsets
    // 3-4.
    let index = QuranIndex::build(
        "10|1|قال ربنا إنا آمنا فاغفر\n\
         10|2|آمنا فاغفر لنا ذنوبنا وقنا\n",
    )
    .unwrap();
    let stopwords = HashSet::new();
    let input = words("قال ربنا إنا آمنا فاغفر لنا ذنوبنا وقنا");
    let options = TaggerOptions { min_tokens: 5, include_ellipses: false, ..TaggerOptions::default() };

    let tagger = Tagger::new(index).with_stopwords(stopwords).with_options(options);
    let matches = tagger.tag(&input).unwrap();

    assert_eq!(matches.len(), 1, "the shorter-surviving overlap must be dropped, not kept alongside");
    assert_eq!(matches[0].text_start, 0);
    assert_eq!(matches[0].text_end, 4, "the earlier-ending chain wins the tie");

    for pair in matches.windows(2) {
        assert!(pair[0].text_end < pair[1].text_start, "surviving matches must be disjoint");
    }
}

/// Scenario 4 — ellipsis to end of sura: a short opening phrase plus
/// "ila akhiriha" expands to the rest of the sura.
#[test]
fn ellipsis_to_end_of_sura() {
    let index = QuranIndex::build(
        "112|1|قل هو الله أحد\n\
         112|2|الله الصمد\n\
         112|3|لم يلد ولم يولد\n\
         112|4|ولم يكن له كفوا أحد\n",
    )
    .unwrap();
    let stopwords = HashSet::new();
    let input = words("بسم الله قل هو الله أحد إلى آخرها شكث");
    let options = TaggerOptions { min_tokens: 4, ..TaggerOptions::default() };

    let tagger = Tagger::new(index).with_stopwords(stopwords).with_options(options);
    let matches = tagger.tag(&input).unwrap();

    assert_eq!(matches.len(), 1);
    // "إلى آخرها" (2 tokens) consumed, "شكث" left untouched outside the match.
    assert_eq!(matches[0].text_end, 7);
    assert_eq!(matches[0].spans[0].qref_start, QRef { sura: 112, verse: 1, word: 1 });
    assert_eq!(matches[0].spans[0].qref_end, QRef { sura: 112, verse: 4, word: 5 });
}

/// Scenario 5 — ellipsis with continuation: "ila qawlihi" followed by a
/// later fragment that itself matches the same sura merges into one
/// contiguous span.
#[test]
fn ellipsis_with_continuation_merges_into_one_span() {
    let index = QuranIndex::build(
        "92|5|فأما من أعطى واتقى\n\
         92|6|وصدق بالحسنى\n\
         92|7|فسنيسره لليسرى\n",
    )
    .unwrap();
    let stopwords = HashSet::new();
    let input = words("فأما من أعطى واتقى إلى قوله فسنيسره لليسرى");
    let options = TaggerOptions { min_tokens: 4, ..TaggerOptions::default() };

    let tagger = Tagger::new(index).with_stopwords(stopwords).with_options(options);
    let matches = tagger.tag(&input).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].spans.len(), 1);
    assert_eq!(matches[0].spans[0].qref_start, QRef { sura: 92, verse: 5, word: 1 });
    assert_eq!(matches[0].spans[0].qref_end, QRef { sura: 92, verse: 7, word: 2 });
}

/// Scenario 6 — common-word rejection: a short chain made entirely of
/// stopwords is dropped when `min_uncommon` requires at least one
/// content word, but survives when the filter is off.
#[test]
fn short_all_stopword_chain_is_filtered_only_when_min_uncommon_is_set() {
    let index = QuranIndex::build("2|255|الله لا اله الا هو الحي القيوم\n").unwrap();
    let stopwords: HashSet<String> = ["لا", "اله", "الا", "هو"]
        .iter()
        .map(|w| quran_tagger::rasm(&quran_tagger::normalise(w)))
        .collect();
    let input = words("لا اله الا");

    let filtered_options = TaggerOptions {
        min_tokens: 3,
        min_uncommon: 1,
        safe_length: 4,
        include_ellipses: false,
        ..TaggerOptions::default()
    };
    let filtered = Tagger::new(QuranIndex::build("2|255|الله لا اله الا هو الحي القيوم\n").unwrap())
        .with_stopwords(stopwords.clone())
        .with_options(filtered_options);
    assert!(filtered.tag(&input).unwrap().is_empty());

    let unfiltered_options = TaggerOptions { min_uncommon: 0, ..filtered_options };
    let unfiltered = Tagger::new(index).with_stopwords(stopwords).with_options(unfiltered_options);
    assert!(!unfiltered.tag(&input).unwrap().is_empty());
}

/// Boundary behaviour — input shorter than `min_tokens` yields an empty
/// result rather than an error.
#[test]
fn input_shorter_than_min_tokens_is_empty() {
    let index = al_ankabut_19();
    let tagger = Tagger::new(index).with_options(TaggerOptions { min_tokens: 5, ..TaggerOptions::default() });
    let matches = tagger.tag(&words("أولم يروا كيف")).unwrap();
    assert!(matches.is_empty());
}

/// Boundary behaviour — a match can start at text offset 0 and another
/// can end at the last word of the input; both are accepted.
#[test]
fn matches_at_the_very_start_and_very_end_of_input_are_both_accepted() {
    let index = al_ankabut_19();
    let tagger = Tagger::new(index).with_options(TaggerOptions {
        min_tokens: 5,
        include_ellipses: false,
        ..TaggerOptions::default()
    });
    let input = words("أولم يروا كيف يبدئ الله الخلق");
    let matches = tagger.tag(&input).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text_start, 0);
    assert_eq!(matches[0].text_end, input.len() - 1);
}

//! Tagged-span XML emission and gold-document handling, both following
//! the conventions of `quran_tagger_altafsir_test.py`: matched spans are
//! wrapped as `<quran ini="sura,verse,word" end="sura,verse,word">...`,
//! and a gold document's byte-offset annotations are rendered the same
//! way for side-by-side comparison.

use std::collections::HashMap;
use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use serde::Deserialize;

use quran_tagger::{Match, QRef};

use crate::error::Result;

fn qref_triplet(qref: &QRef) -> String {
    format!("{},{},{}", qref.sura, qref.verse, qref.word)
}

/// Renders `words` as the altafsir-style tagged text: each match wraps its
/// text span in `<quran ini="..." end="...">`. When a span is
/// ambiguous between more than one Qur'anic passage, the first span is
/// used for the tag's attributes, matching the one-pair-per-match shape
/// `quran_tagger_altafsir_test.py` assumes.
pub fn write_tagged(words: &[String], matches: &[Match]) -> Result<String> {
    let mut by_start: HashMap<usize, &Match> = HashMap::new();
    let mut by_end: HashMap<usize, &Match> = HashMap::new();
    for m in matches {
        by_start.insert(m.text_start, m);
        by_end.insert(m.text_end, m);
    }

    let mut writer = Writer::new(Cursor::new(Vec::new()));
    for (i, word) in words.iter().enumerate() {
        if let Some(m) = by_start.get(&i) {
            let span = m.spans.first().expect("a surviving match always carries at least one span");
            let mut start = BytesStart::new("quran");
            start.push_attribute(("ini", qref_triplet(&span.qref_start).as_str()));
            start.push_attribute(("end", qref_triplet(&span.qref_end).as_str()));
            writer.write_event(Event::Start(start))?;
        }
        writer.write_event(Event::Text(BytesText::new(word)))?;
        if by_end.contains_key(&i) {
            writer.write_event(Event::End(BytesEnd::new("quran")))?;
        }
        if i + 1 < words.len() {
            writer.write_event(Event::Text(BytesText::new(" ")))?;
        }
    }

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes).expect("writer only ever emits the UTF-8 input text back out"))
}

/// Extracts every `<quran>...</quran>` text content from an evaluation
/// file, with parenthesised verse-number annotations like `(3)` dropped
/// (`evaluate_altafsir.py`'s `RM_NUM_REGEX`). Parsing is lenient — these
/// files are prose with inline tags, not strict XML documents — so
/// mismatched or unescaped markup is tolerated rather than rejected.
pub fn extract_quran_quotes(data: &str) -> Result<std::collections::HashSet<String>> {
    let mut reader = Reader::from_str(data);
    reader.check_end_names(false);
    reader.trim_text(false);

    let mut quotes = std::collections::HashSet::new();
    let mut depth = 0u32;
    let mut current = String::new();
    let mut buf = Vec::new();

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(_) => break,
        };
        match event {
            Event::Eof => break,
            Event::Start(e) if e.local_name().as_ref() == b"quran" => {
                depth += 1;
                current.clear();
            }
            Event::End(e) if e.local_name().as_ref() == b"quran" && depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    quotes.insert(strip_verse_numbers(current.trim()));
                }
            }
            Event::Text(t) if depth > 0 => {
                if let Ok(text) = t.unescape() {
                    current.push_str(&text);
                }
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(quotes)
}

fn strip_verse_numbers(s: &str) -> String {
    let re = regex::Regex::new(r"\([0-9]+\)").expect("fixed regex literal is always valid");
    re.replace_all(s, "").to_string()
}

/// A single-document gold-standard annotation, the shape
/// `quran_tagger_altafsir_test.py` reads from stdin: a block of text plus
/// a list of byte-offset Qur'an annotation spans.
#[derive(Debug, Deserialize)]
pub struct GoldDocument {
    pub text: String,
    pub annotation: GoldAnnotation,
}

#[derive(Debug, Deserialize)]
pub struct GoldAnnotation {
    pub aya: Vec<GoldSpan>,
}

#[derive(Debug, Deserialize)]
pub struct GoldSpan {
    pub start: usize,
    pub end: usize,
}

/// Wraps every gold annotation's byte-offset span in `<quran>...</quran>`,
/// inserting back-to-front (highest offset first) so that earlier
/// offsets stay valid while later insertions shift the string, exactly
/// as `quran_tagger_altafsir_test.py` processes `doc['annotation']['aya']`
/// in reverse.
pub fn annotate_gold_text(doc: &GoldDocument) -> String {
    let mut spans: Vec<&GoldSpan> = doc.annotation.aya.iter().collect();
    spans.sort_by_key(|s| s.start);

    let mut text = doc.text.clone();
    for span in spans.iter().rev() {
        text.insert_str(span.end, "\n</quran>\n");
        text.insert_str(span.start, "\n<quran>\n");
    }
    text
}

//! C3 — Qur'ān index builder.
//!
//! Turns a line-oriented `sura|verse|text` source into the three
//! read-only structures the rest of the tagger searches against:
//! `qtext`, `qrasm`, and `sura_names`.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, TaggerError};
use crate::types::{QRef, QuranIndex, Token};

/// The canonical sura titles, 1-indexed by position in this slice.
/// Additional epithets for the same sura are listed alongside it and
/// alias to the same `(start_q, end_q)` range.
const SURA_NAMES: &[(&str, &[&str])] = &[
    ("الفاتحة", &["أم القرآن", "أم الكتاب", "السبع المثاني"]),
    ("البقرة", &[]),
    ("آل عمران", &[]),
    ("النساء", &[]),
    ("المائدة", &[]),
    ("الأنعام", &[]),
    ("الأعراف", &[]),
    ("الأنفال", &[]),
    ("التوبة", &[]),
    ("يونس", &[]),
    ("هود", &[]),
    ("يوسف", &[]),
    ("الرعد", &[]),
    ("إبراهيم", &[]),
    ("الحجر", &[]),
    ("النحل", &[]),
    ("الإسراء", &[]),
    ("الكهف", &[]),
    ("مريم", &[]),
    ("طه", &[]),
    ("الأنبياء", &[]),
    ("الحج", &[]),
    ("المؤمنون", &[]),
    ("النور", &[]),
    ("الفرقان", &[]),
    ("الشعراء", &[]),
    ("النمل", &[]),
    ("القصص", &[]),
    ("العنكبوت", &[]),
    ("الروم", &[]),
    ("لقمان", &[]),
    ("السجدة", &[]),
    ("الأحزاب", &[]),
    ("سبأ", &[]),
    ("فاطر", &[]),
    ("يس", &[]),
    ("الصافات", &[]),
    ("ص", &[]),
    ("الزمر", &[]),
    ("غافر", &[]),
    ("فصلت", &[]),
    ("الشورى", &[]),
    ("الزخرف", &[]),
    ("الدخان", &[]),
    ("الجاثية", &[]),
    ("الأحقاف", &[]),
    ("محمد", &[]),
    ("الفتح", &[]),
    ("الحجرات", &[]),
    ("ق", &[]),
    ("الذاريات", &[]),
    ("الطور", &[]),
    ("النجم", &[]),
    ("القمر", &[]),
    ("الرحمن", &[]),
    ("الواقعة", &[]),
    ("الحديد", &[]),
    ("المجادلة", &[]),
    ("الحشر", &[]),
    ("الممتحنة", &[]),
    ("الصف", &[]),
    ("الجمعة", &[]),
    ("المنافقون", &[]),
    ("التغابن", &[]),
    ("الطلاق", &[]),
    ("التحريم", &[]),
    ("الملك", &[]),
    ("القلم", &[]),
    ("الحاقة", &[]),
    ("المعارج", &[]),
    ("نوح", &[]),
    ("الجن", &[]),
    ("المزمل", &[]),
    ("المدثر", &[]),
    ("القيامة", &[]),
    ("الإنسان", &["الدهر"]),
    ("المرسلات", &[]),
    ("النبأ", &[]),
    ("النازعات", &[]),
    ("عبس", &[]),
    ("التكوير", &[]),
    ("الانفطار", &[]),
    ("المطففين", &[]),
    ("الانشقاق", &[]),
    ("البروج", &[]),
    ("الطارق", &[]),
    ("الأعلى", &[]),
    ("الغاشية", &[]),
    ("الفجر", &[]),
    ("البلد", &[]),
    ("الشمس", &[]),
    ("الليل", &[]),
    ("الضحى", &[]),
    ("الشرح", &["الانشراح"]),
    ("التين", &[]),
    ("العلق", &[]),
    ("القدر", &[]),
    ("البينة", &[]),
    ("الزلزلة", &[]),
    ("العاديات", &[]),
    ("القارعة", &[]),
    ("التكاثر", &[]),
    ("العصر", &[]),
    ("الهمزة", &[]),
    ("الفيل", &[]),
    ("قريش", &[]),
    ("الماعون", &[]),
    ("الكوثر", &[]),
    ("الكافرون", &[]),
    ("النصر", &[]),
    ("المسد", &["تبت"]),
    ("الإخلاص", &["التوحيد"]),
    ("الفلق", &[]),
    ("الناس", &[]),
];

/// Parses one `sura|verse|text` line, returning `None` for blank lines
/// and comments.
fn parse_line(line: &str, lineno: usize) -> Result<Option<(u16, u16, &str)>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let mut fields = trimmed.splitn(3, '|');
    let sura = fields.next().ok_or_else(|| TaggerError::SourceFormat {
        line: lineno,
        reason: "missing sura field".to_string(),
    })?;
    let verse = fields.next().ok_or_else(|| TaggerError::SourceFormat {
        line: lineno,
        reason: "missing verse field".to_string(),
    })?;
    let text = fields.next().ok_or_else(|| TaggerError::SourceFormat {
        line: lineno,
        reason: "missing text field".to_string(),
    })?;
    let sura: u16 = sura.trim().parse().map_err(|_| TaggerError::SourceFormat {
        line: lineno,
        reason: format!("sura {:?} is not an integer", sura.trim()),
    })?;
    let verse: u16 = verse.trim().parse().map_err(|_| TaggerError::SourceFormat {
        line: lineno,
        reason: format!("verse {:?} is not an integer", verse.trim()),
    })?;
    Ok(Some((sura, verse, text.trim())))
}

/// Builds the Qur'ān index from pipe-delimited source text.
pub fn build(source: &str) -> Result<QuranIndex> {
    let mut qtext = Vec::new();
    let mut qrasm: HashMap<String, HashSet<usize>> = HashMap::new();
    let mut sura_ranges: HashMap<u16, (usize, usize)> = HashMap::new();

    for (lineno, line) in source.lines().enumerate() {
        let Some((sura, verse, text)) = parse_line(line, lineno + 1)? else {
            continue;
        };
        let words: Vec<&str> = text.split_whitespace().collect();

        for (word_in_verse, word) in words.iter().enumerate() {
            let token = Token::new(word);
            let qref = QRef { sura, verse, word: (word_in_verse + 1) as u16 };
            let id = qtext.len();
            qrasm.entry(token.rasm.clone()).or_default().insert(id);
            qtext.push((qref, token));

            sura_ranges
                .entry(sura)
                .and_modify(|(_, end)| *end = id)
                .or_insert((id, id));
        }
    }

    let mut sura_names = HashMap::new();
    for (position, (title, epithets)) in SURA_NAMES.iter().enumerate() {
        let sura = (position + 1) as u16;
        let Some(range) = sura_ranges.get(&sura).copied() else {
            continue;
        };
        sura_names.insert(crate::normalize::normalise(title), range);
        for epithet in *epithets {
            sura_names.insert(crate::normalize::normalise(epithet), range);
        }
    }

    Ok(QuranIndex { qtext, qrasm, sura_names })
}

impl QuranIndex {
    /// Builds an index from a line-oriented `sura|verse|text` source.
    pub fn build(source: &str) -> Result<Self> {
        build(source)
    }
}

//! Bulk gold-vs-tagged XML comparison, ported from `evaluate_altafsir.py`:
//! for every `<name>.gold.xml`/`<name>.tagged.xml` pair in a directory,
//! compare the sets of `<quran>` quotation texts and tally how many the
//! tagger reproduced exactly, missed, or invented.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{CliError, Result};
use crate::xml;

/// Precision/recall bookkeeping over one directory's worth of
/// gold/tagged pairs. `correct`/`not_found` come from iterating the gold
/// quotations (recall); `false_positive` comes from iterating the
/// tagged quotations (precision), mirroring the two loops in
/// `evaluate_altafsir.py`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EvaluationReport {
    pub correct: usize,
    pub not_found: usize,
    pub false_positive: usize,
}

/// Runs the comparison over every gold/tagged pair under `dir`. When
/// `min_words` is set, quotations shorter than it (on either side) are
/// excluded from the comparison before counting, matching the Python
/// tool's `--min` flag.
pub fn evaluate(dir: &Path, min_words: Option<usize>) -> Result<EvaluationReport> {
    let mut report = EvaluationReport::default();

    for basename in gold_basenames(dir)? {
        let gold_path = dir.join(format!("{basename}.gold.xml"));
        let tagged_path = dir.join(format!("{basename}.tagged.xml"));
        if !tagged_path.exists() {
            tracing::debug!(basename, "no .tagged.xml counterpart; skipping");
            continue;
        }

        let gold_data = read_to_string(&gold_path)?;
        let tagged_data = read_to_string(&tagged_path)?;

        let mut gold_quotes = xml::extract_quran_quotes(&gold_data)?;
        let mut tagg_quotes = xml::extract_quran_quotes(&tagged_data)?;

        if let Some(min) = min_words {
            retain_at_least(&mut gold_quotes, min);
            retain_at_least(&mut tagg_quotes, min);
        }

        for quote in &gold_quotes {
            if tagg_quotes.contains(quote) {
                report.correct += 1;
            } else {
                report.not_found += 1;
            }
        }
        for quote in &tagg_quotes {
            if !gold_quotes.contains(quote) {
                report.false_positive += 1;
            }
        }
    }

    Ok(report)
}

fn retain_at_least(quotes: &mut HashSet<String>, min_words: usize) {
    quotes.retain(|q| q.split_whitespace().count() >= min_words);
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::Io { path: path.display().to_string(), source })
}

/// Every basename under `dir` with a `.gold.xml` counterpart, sorted for
/// deterministic iteration (the Python original iterates a `set`, whose
/// order is incidental; this doesn't affect the tallies but makes
/// `--verbose` runs reproducible).
fn gold_basenames(dir: &Path) -> Result<Vec<String>> {
    let mut names = HashSet::new();
    let entries = fs::read_dir(dir).map_err(|source| CliError::Io { path: dir.display().to_string(), source })?;
    for entry in entries {
        let entry = entry.map_err(|source| CliError::Io { path: dir.display().to_string(), source })?;
        let file_name = entry.file_name();
        if let Some(base) = file_name.to_string_lossy().strip_suffix(".gold.xml") {
            names.insert(base.to_string());
        }
    }
    let mut names: Vec<String> = names.into_iter().collect();
    names.sort();
    Ok(names)
}

//! Loading the Qur'an source and stopword set from disk, overriding
//! whatever defaults a caller might otherwise embed.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use quran_tagger::QuranIndex;

use crate::error::{CliError, Result};

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::Io { path: path.display().to_string(), source })
}

/// Builds a [`QuranIndex`] from a pipe-delimited `sura|verse|text` file.
/// A malformed line is a hard failure at this stage (`spec.md`'s
/// "source-format error"): there is no sensible partial index to fall
/// back to.
pub fn load_quran_index(path: &Path) -> Result<QuranIndex> {
    let source = read_to_string(path)?;
    Ok(QuranIndex::build(&source)?)
}

/// Loads a JSON array of stopword surface forms and converts each to its
/// rasm. A missing `--stopwords` path is handled by the caller, not here:
/// this function is only reached when a path was given.
pub fn load_stopwords(path: &Path) -> Result<HashSet<String>> {
    let data = read_to_string(path)?;
    Ok(quran_tagger::load_stopwords(&data)?)
}

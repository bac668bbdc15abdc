//! Word-list ingestion: whitespace-split plain text, or a JSON array of
//! word tokens.

use crate::error::Result;

/// Reads an ordered word list out of `data`, either whitespace-split
/// plain text or (when `as_json`) a JSON array of strings.
pub fn read_words(data: &str, as_json: bool) -> Result<Vec<String>> {
    if as_json {
        Ok(serde_json::from_str(data)?)
    } else {
        Ok(data.split_whitespace().map(String::from).collect())
    }
}

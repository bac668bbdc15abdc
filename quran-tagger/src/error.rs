//! Domain errors the tagger can raise.
//!
//! Almost everything the tagger does is total: bad input normalises to
//! something, and an absent stopword set just disables a filter. The only
//! hard failures are a caller bug (`min_tokens <= 0`) and a malformed
//! Qur'an source at index-build time.

use thiserror::Error;

/// Errors the core crate can return.
#[derive(Debug, Error)]
pub enum TaggerError {
    /// `min_tokens <= 0`: the caller asked for an impossible match length.
    #[error("illogical tokens count: min_tokens must be at least 1, got {0}")]
    IllogicalTokenCount(i64),

    /// A line of the Qur'an source did not match `sura|verse|text`.
    #[error("malformed Qur'an source at line {line}: {reason}")]
    SourceFormat { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, TaggerError>;

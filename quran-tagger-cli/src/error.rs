//! Errors the command-line driver can surface.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("reading {path}: {source}")]
    Io { path: String, #[source] source: std::io::Error },

    #[error(transparent)]
    Tagger(#[from] quran_tagger::TaggerError),

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parsing XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

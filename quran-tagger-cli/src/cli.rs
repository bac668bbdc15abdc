//! `clap` argument definitions for the `quran-tagger` binary's three
//! subcommands: `tag`, `evaluate`, `prepare-stopwords`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "quran-tagger", version, about = "Locate Qur'anic quotations inside Arabic prose")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Overridden
    /// by `RUST_LOG` when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tag Qur'anic quotations in an input word list.
    Tag(TagArgs),
    /// Compare tagger output against gold-standard XML, altafsir-style.
    Evaluate(EvaluateArgs),
    /// Derive a rasm stopword set from a POS-tagged Qur'an corpus.
    PrepareStopwords(PrepareStopwordsArgs),
}

#[derive(Args, Debug)]
pub struct TagArgs {
    /// Path to the pipe-delimited `sura|verse|text` Qur'an source.
    #[arg(long)]
    pub quran: PathBuf,

    /// Path to a JSON array of stopword surface forms. Omitting this
    /// disables the common-word filter rather than failing the call.
    #[arg(long)]
    pub stopwords: Option<PathBuf>,

    /// Path to the input word list; reads stdin when absent.
    #[arg(long)]
    pub words: Option<PathBuf>,

    /// Parse the word list as a JSON array of strings rather than
    /// whitespace-split plain text.
    #[arg(long)]
    pub words_json: bool,

    /// A single altafsir-style gold document (`{"text": ..., "annotation":
    /// {"aya": [...]}}`); when given, `--words`/`--words-json` are ignored
    /// and the document's own text is tagged.
    #[arg(long)]
    pub gold_from: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Minimum chain length, in words, to accept as a candidate.
    #[arg(long, default_value_t = 5)]
    pub min_tokens: i64,

    /// Skip the vowel-tolerant equality re-check and accept rasm matches
    /// as-is.
    #[arg(long)]
    pub rasm_match: bool,

    /// Minimum number of non-stopword tokens for chains shorter than
    /// `--safe-length`. 0 disables the filter.
    #[arg(long, default_value_t = 0)]
    pub min_uncommon: usize,

    /// Chain length at or above which the common-word filter is skipped.
    #[arg(long, default_value_t = 4)]
    pub safe_length: usize,

    /// Disable the ellipsis recogniser.
    #[arg(long)]
    pub no_ellipses: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One line per `(text_start, text_end, Qur'an span)`.
    Text,
    /// The input text with `<quran ini=... end=...>` tags inserted,
    /// following `quran_tagger_altafsir_test.py`'s convention.
    Xml,
    /// The raw match records as JSON.
    Json,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Directory of `<name>.gold.xml` / `<name>.tagged.xml` pairs.
    pub dir: PathBuf,

    /// Only compare quotations with at least this many words.
    #[arg(long)]
    pub min: Option<usize>,
}

#[derive(Args, Debug)]
pub struct PrepareStopwordsArgs {
    /// JSON array of POS-tagged morphemes (`sura`, `vers`, `word`, `tok`,
    /// `POS`).
    pub corpus: PathBuf,

    /// Write the derived stopword JSON array here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

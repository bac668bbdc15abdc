//! Command-line driver for the Qur'an quotation tagger: the external
//! collaborator `spec.md` §1 names alongside the core — argument
//! parsing, Qur'an source/stopword file loading, word-list ingestion,
//! XML emission, and gold-standard evaluation all live here, outside
//! the pure `quran_tagger` crate.

mod cli;
mod error;
mod evaluate;
mod io;
mod source;
mod xml;

use std::io::Read as _;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, EvaluateArgs, OutputFormat, PrepareStopwordsArgs, TagArgs};
use error::{CliError, Result};
use quran_tagger::{Match, Tagger, TaggerOptions};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "quran-tagger failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Tag(args) => run_tag(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::PrepareStopwords(args) => run_prepare_stopwords(args),
    }
}

fn run_tag(args: TagArgs) -> Result<()> {
    let index = source::load_quran_index(&args.quran)?;
    let stopwords = match &args.stopwords {
        Some(path) => source::load_stopwords(path)?,
        None => {
            tracing::debug!("no --stopwords given; the common-word filter is disabled");
            Default::default()
        }
    };

    let options = TaggerOptions {
        min_tokens: args.min_tokens,
        rasm_match: args.rasm_match,
        min_uncommon: args.min_uncommon,
        safe_length: args.safe_length,
        include_ellipses: !args.no_ellipses,
    };
    let tagger = Tagger::new(index).with_stopwords(stopwords).with_options(options);

    if let Some(gold_path) = &args.gold_from {
        return run_tag_gold(&tagger, gold_path, args.format);
    }

    let data = match &args.words {
        Some(path) => read_file(path)?,
        None => read_stdin()?,
    };
    let words = io::read_words(&data, args.words_json)?;
    let matches = tagger.tag(&words)?;
    print_matches(&words, &matches, args.format)
}

/// `tag --gold-from`: tags one altafsir-style document and prints both
/// the gold-annotated text and the tagger's own tagged text, mirroring
/// `quran_tagger_altafsir_test.py`'s side-by-side output.
fn run_tag_gold(tagger: &Tagger, gold_path: &Path, format: OutputFormat) -> Result<()> {
    let data = read_file(gold_path)?;
    let doc: xml::GoldDocument = serde_json::from_str(&data)?;

    println!("{}", xml::annotate_gold_text(&doc));
    println!();

    let words: Vec<String> = doc.text.split_whitespace().map(String::from).collect();
    let matches = tagger.tag(&words)?;
    print_matches(&words, &matches, format)
}

fn print_matches(words: &[String], matches: &[Match], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for m in matches {
                let quoted = words[m.text_start..=m.text_end].join(" ");
                for span in &m.spans {
                    println!(
                        "{}..{} -> {},{},{}..{},{},{}: {quoted}",
                        m.text_start,
                        m.text_end,
                        span.qref_start.sura,
                        span.qref_start.verse,
                        span.qref_start.word,
                        span.qref_end.sura,
                        span.qref_end.verse,
                        span.qref_end.word,
                    );
                }
            }
            Ok(())
        }
        OutputFormat::Xml => {
            println!("{}", xml::write_tagged(words, matches)?);
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(matches)?);
            Ok(())
        }
    }
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let report = evaluate::evaluate(&args.dir, args.min)?;
    println!("correct        = {}", report.correct);
    println!("not found      = {}", report.not_found);
    println!("false positive = {}", report.false_positive);
    Ok(())
}

fn run_prepare_stopwords(args: PrepareStopwordsArgs) -> Result<()> {
    let data = read_file(&args.corpus)?;
    let stopwords = quran_tagger::derive_stopwords(&data)?;

    let mut list: Vec<&String> = stopwords.iter().collect();
    list.sort();
    let json = serde_json::to_string_pretty(&list)?;

    match &args.output {
        Some(path) => fs_write(path, &json),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn fs_write(path: &Path, data: &str) -> Result<()> {
    std::fs::write(path, data).map_err(|source| CliError::Io { path: path.display().to_string(), source })
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io { path: path.display().to_string(), source })
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|source| CliError::Io { path: "<stdin>".to_string(), source })?;
    Ok(buf)
}

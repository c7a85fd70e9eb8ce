//! Extract command — count tags and print or save the sorted report.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use tag_extractor_core::{Config, Session, TagCount, TokenizerMode};

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Text file to analyze.
    pub file: Utf8PathBuf,

    /// Stop-word file, one word per line.
    #[arg(short, long, value_name = "FILE")]
    pub stop_words: Option<Utf8PathBuf>,

    /// Also write the full report to this file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Tokenization rule.
    #[arg(long, value_enum)]
    pub tokenizer: Option<TokenizerMode>,

    /// Print at most this many tags.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct ExtractOutput<'a> {
    file: &'a str,
    tokenizer: TokenizerMode,
    distinct: usize,
    total: usize,
    tags: &'a [TagCount],
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_to: Option<String>,
}

/// Count tags in a file, print the sorted report, and optionally save it.
///
/// Command-line values win over configuration values.
#[instrument(name = "cmd_extract", skip_all, fields(file = %args.file))]
pub fn cmd_extract(args: ExtractArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let mode = args.tokenizer.or(config.tokenizer).unwrap_or_default();
    let stop_words = args.stop_words.or_else(|| config.stop_words.clone());
    let output = args.output.or_else(|| config.output.clone());
    let limit = args.limit.or(config.limit);
    debug!(
        stop_words = ?stop_words,
        output = ?output,
        %mode,
        limit = ?limit,
        "executing extract command"
    );

    let mut session = Session::new()
        .with_input(&args.file)
        .with_mode(mode)
        .with_max_input_bytes(config.input_limit());
    session.stop_words = stop_words;
    session.output = output;

    let report = session
        .extract_tags()
        .with_context(|| format!("failed to extract tags from {}", args.file))?;

    let saved_to = if session.output.is_some() {
        let path = session
            .save_report()
            .context("failed to save report")?;
        Some(path)
    } else {
        None
    };

    let shown = limit.map_or(report.entries.as_slice(), |n| report.top(n));

    if global_json {
        let out = ExtractOutput {
            file: args.file.as_str(),
            tokenizer: mode,
            distinct: report.len(),
            total: report.total(),
            tags: shown,
            saved_to: saved_to.as_ref().map(ToString::to_string),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if report.is_empty() {
        eprintln!("{} no tags found in {}", "note:".yellow(), args.file);
    }
    for entry in shown {
        println!("{entry}");
    }
    if shown.len() < report.len() {
        eprintln!(
            "{}",
            format!("... {} more tags not shown", report.len() - shown.len()).dimmed()
        );
    }
    if let Some(path) = saved_to {
        eprintln!("{} {}", "Saved to".green(), path);
    }

    Ok(())
}

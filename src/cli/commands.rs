//! Command implementations for the find-sentence CLI.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::{Corpus, CorpusConfig, SearchOptions};

/// Execute a CLI command, writing its output to stdout.
pub fn execute_command(args: FindSentenceArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command_to(&args, &mut out)
}

/// Execute a CLI command, writing its output to `out`.
pub fn execute_command_to<W: Write>(args: &FindSentenceArgs, out: &mut W) -> Result<()> {
    let corpus = open_corpus(args)?;
    match &args.command {
        Command::Search(search_args) => search(&corpus, search_args, args, out),
        Command::Show(show_args) => show(&corpus, show_args, args, out),
        Command::Stats => stats(&corpus, args, out),
    }
}

fn open_corpus(args: &FindSentenceArgs) -> Result<Corpus> {
    let config = match &args.config {
        Some(path) => CorpusConfig::from_json_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => CorpusConfig::default(),
    };

    Corpus::open_with_config(&args.path, &args.language, config).with_context(|| {
        format!(
            "failed to load {} corpus from {}",
            args.language,
            args.path.display()
        )
    })
}

fn search<W: Write>(
    corpus: &Corpus,
    search_args: &SearchArgs,
    args: &FindSentenceArgs,
    out: &mut W,
) -> Result<()> {
    let mut options = SearchOptions::new();
    if let Some(limit) = search_args.limit {
        options = options.with_max_results(limit);
    }
    if let Some(ms) = search_args.timeout_ms {
        options = options.with_timeout(Duration::from_millis(ms));
    }

    let matches = corpus
        .search_with(&search_args.word, &options)
        .with_context(|| format!("search for {:?} failed", search_args.word))?;
    let records: Vec<_> = matches.iter().map(|m| m.to_record()).collect();

    write_records(out, &records, args)?;
    Ok(())
}

fn show<W: Write>(
    corpus: &Corpus,
    show_args: &ShowArgs,
    args: &FindSentenceArgs,
    out: &mut W,
) -> Result<()> {
    let chapter = corpus.find_original(&show_args.series, &show_args.filename)?;
    write_chapter(out, &chapter.to_view(), args)?;
    Ok(())
}

fn stats<W: Write>(corpus: &Corpus, args: &FindSentenceArgs, out: &mut W) -> Result<()> {
    let stats = CorpusStats {
        language: corpus.language().to_string(),
        chapters: corpus.len(),
        series: corpus.series().len(),
        lines: corpus.chapters().iter().map(|c| c.line_count()).sum(),
        load_failures: corpus
            .load_failures()
            .iter()
            .map(|e| e.to_string())
            .collect(),
    };
    write_stats(out, &stats, args)?;
    Ok(())
}

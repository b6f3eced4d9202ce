//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::{FindSentenceArgs, OutputFormat};
use crate::corpus::{ChapterView, SearchRecord};
use crate::error::Result;

/// Summary printed by the `stats` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorpusStats {
    pub language: String,
    pub chapters: usize,
    pub series: usize,
    pub lines: usize,
    pub load_failures: Vec<String>,
}

/// Write search hits, one per line: `series title line`.
pub fn write_records<W: Write>(
    out: &mut W,
    records: &[SearchRecord],
    args: &FindSentenceArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => write_json(out, records, args.pretty),
        OutputFormat::Human => {
            for record in records {
                writeln!(out, "{} {} {}", record.series, record.chapter, record.line)?;
            }
            if args.verbosity() > 1 {
                writeln!(out, "{} result(s)", records.len())?;
            }
            Ok(())
        }
    }
}

/// Write a chapter with its title on the first line.
pub fn write_chapter<W: Write>(out: &mut W, view: &ChapterView, args: &FindSentenceArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => write_json(out, view, args.pretty),
        OutputFormat::Human => {
            writeln!(out, "{} / {}", view.series, view.filename)?;
            writeln!(out, "{}", view.title)?;
            writeln!(out)?;
            write!(out, "{}", view.body)?;
            if !view.body.is_empty() && !view.body.ends_with('\n') {
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

/// Write corpus statistics.
pub fn write_stats<W: Write>(out: &mut W, stats: &CorpusStats, args: &FindSentenceArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => write_json(out, stats, args.pretty),
        OutputFormat::Human => {
            writeln!(out, "Corpus Statistics ({}):", stats.language)?;
            writeln!(out, "  Chapters: {}", stats.chapters)?;
            writeln!(out, "  Series: {}", stats.series)?;
            writeln!(out, "  Lines: {}", stats.lines)?;
            if !stats.load_failures.is_empty() {
                writeln!(out, "  Load failures: {}", stats.load_failures.len())?;
                for failure in &stats.load_failures {
                    writeln!(out, "    {failure}")?;
                }
            }
            Ok(())
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

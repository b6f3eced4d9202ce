//! Command line argument parsing for the find-sentence CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// find-sentence - look up example sentences in a chaptered text corpus
#[derive(Parser, Debug, Clone)]
#[command(name = "find-sentence")]
#[command(about = "Find example sentences containing a word in a text corpus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FindSentenceArgs {
    /// Corpus root containing one directory per language
    #[arg(short, long, default_value = "./out", env = "CORPUS_PATH")]
    pub path: PathBuf,

    /// Language directory to load
    #[arg(short, long, default_value = "jp", env = "CORPUS_LANGUAGE")]
    pub language: String,

    /// Corpus configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FindSentenceArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Log level for the binary: `-q` shows errors only, the default shows
    /// skipped chapters, `-vv` adds load summaries and `-vvv` search timings.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print every line containing a word
    Search(SearchArgs),

    /// Print a single chapter
    Show(ShowArgs),

    /// Show corpus statistics
    Stats,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Word to search for (literal, case-sensitive)
    #[arg(value_name = "WORD", default_value = "です")]
    pub word: String,

    /// Maximum number of results to return
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Give up after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

/// Arguments for showing a chapter
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Series directory name
    #[arg(value_name = "SERIES")]
    pub series: String,

    /// Chapter file name, including the extension
    #[arg(value_name = "FILENAME")]
    pub filename: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = FindSentenceArgs::try_parse_from(["find-sentence", "search"]).unwrap();

        assert_eq!(args.path, PathBuf::from("./out"));
        assert_eq!(args.language, "jp");
        assert_eq!(args.verbosity(), 1);
        assert_eq!(args.output_format, OutputFormat::Human);
        match args.command {
            Command::Search(search) => {
                assert_eq!(search.word, "です");
                assert_eq!(search.limit, None);
            }
            other => panic!("Expected Search command, got {other:?}"),
        }
    }

    #[test]
    fn test_search_options() {
        let args = FindSentenceArgs::try_parse_from([
            "find-sentence",
            "--path",
            "/data/corpus",
            "-l",
            "zh",
            "-f",
            "json",
            "-vv",
            "search",
            "例文",
            "--limit",
            "5",
            "--timeout-ms",
            "250",
        ])
        .unwrap();

        assert_eq!(args.path, PathBuf::from("/data/corpus"));
        assert_eq!(args.language, "zh");
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.verbosity(), 2);
        if let Command::Search(search) = args.command {
            assert_eq!(search.word, "例文");
            assert_eq!(search.limit, Some(5));
            assert_eq!(search.timeout_ms, Some(250));
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_show_and_quiet() {
        let args =
            FindSentenceArgs::try_parse_from(["find-sentence", "-q", "-v", "show", "seriesA", "001.txt"])
                .unwrap();

        assert_eq!(args.verbosity(), 0);
        if let Command::Show(show) = args.command {
            assert_eq!(show.series, "seriesA");
            assert_eq!(show.filename, "001.txt");
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn test_log_level_follows_verbosity() {
        let level = |flags: &[&str]| {
            let mut argv = vec!["find-sentence"];
            argv.extend_from_slice(flags);
            argv.push("stats");
            FindSentenceArgs::try_parse_from(argv).unwrap().log_level()
        };

        assert_eq!(level(&["-q"]), LevelFilter::Error);
        assert_eq!(level(&[]), LevelFilter::Warn);
        assert_eq!(level(&["-vv"]), LevelFilter::Info);
        assert_eq!(level(&["-vvvv"]), LevelFilter::Debug);
    }

    #[test]
    fn test_show_requires_filename() {
        assert!(FindSentenceArgs::try_parse_from(["find-sentence", "show", "seriesA"]).is_err());
    }
}

//! Error types for the corpus engine.
//!
//! Every fallible operation returns a [`CorpusError`]. Directory listing
//! failures abort construction, per-chapter read failures are collected into
//! [`CorpusError::Load`], and a missing chapter is reported as the distinct
//! [`CorpusError::ChapterNotFound`] kind so that callers can tell "no such
//! chapter" apart from an I/O failure.
//!
//! # Examples
//!
//! ```
//! use sentence_corpus::error::{CorpusError, Result};
//!
//! fn lookup() -> Result<()> {
//!     Err(CorpusError::chapter_not_found("seriesA", "001.txt"))
//! }
//!
//! match lookup() {
//!     Err(e) if e.is_not_found() => println!("404"),
//!     Err(e) => eprintln!("Error: {}", e),
//!     Ok(_) => println!("Success"),
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for corpus operations.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// A root, language or series directory could not be listed.
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single chapter file could not be read.
    #[error("could not load body for chapter {}: {source}", path.display())]
    ChapterLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One or more chapters failed during the parallel load phase.
    #[error("failed to load {} chapter(s); first failure: {}", failures.len(), first_message(failures))]
    Load { failures: Vec<CorpusError> },

    /// No chapter matches the requested series and filename.
    #[error("could not find chapter {filename} in series {series}")]
    ChapterNotFound { series: String, filename: String },

    /// Operation cancelled through a task guard.
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Operation exceeded its deadline.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O errors without a more specific context.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with CorpusError.
pub type Result<T> = std::result::Result<T, CorpusError>;

fn first_message(failures: &[CorpusError]) -> String {
    failures
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "none".to_string())
}

impl CorpusError {
    /// Create a directory listing error.
    pub fn read_dir<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        CorpusError::ReadDir {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a chapter load error.
    pub fn chapter_load<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        CorpusError::ChapterLoad {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a not found error for a chapter.
    pub fn chapter_not_found<S: Into<String>, F: Into<String>>(series: S, filename: F) -> Self {
        CorpusError::ChapterNotFound {
            series: series.into(),
            filename: filename.into(),
        }
    }

    /// Create a new cancelled error.
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        CorpusError::Cancelled(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        CorpusError::Timeout(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        CorpusError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        CorpusError::Other(msg.into())
    }

    /// Whether this is the "chapter not found" kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CorpusError::ChapterNotFound { .. })
    }

    /// Whether the operation was stopped by cancellation or a deadline.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, CorpusError::Cancelled(_) | CorpusError::Timeout(_))
    }
}

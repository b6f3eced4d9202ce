//! # sentence-corpus
//!
//! An in-memory corpus engine for finding example sentences in a collection
//! of chaptered text files.
//!
//! ## Features
//!
//! - Loads `root/<language>/<series>/<chapter>.txt` trees on a bounded worker pool
//! - Literal, case-sensitive substring search over every line of every chapter
//! - Bounded parallel fan-out with cancellation and deadlines
//! - Exact chapter lookup with a distinct "not found" error
//!
//! ## Example
//!
//! ```no_run
//! use sentence_corpus::corpus::Corpus;
//!
//! let corpus = Corpus::open("./out", "jp")?;
//! for hit in corpus.search("テスト") {
//!     println!("{} {} {}", hit.chapter.series(), hit.chapter.title(), hit.line);
//! }
//! # Ok::<(), sentence_corpus::error::CorpusError>(())
//! ```

pub mod cli;
pub mod corpus;
pub mod error;

pub mod prelude {
    pub use crate::corpus::{
        Chapter, ChapterView, Corpus, CorpusConfig, LineMatch, SearchOptions, SearchRecord,
        TaskGuard,
    };
    pub use crate::error::{CorpusError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

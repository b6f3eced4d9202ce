//! In-memory corpus of chaptered text files.
//!
//! This module provides functionality to:
//! - Discover chapters laid out as `root/<language>/<series>/<chapter>.txt`
//! - Load chapter bodies on a bounded worker pool
//! - Search every line of every chapter concurrently for a literal substring
//! - Look up a single chapter for display

pub mod chapter;
pub mod config;
pub mod engine;
pub mod loader;
pub mod record;
pub mod task;

pub use chapter::{Chapter, LineMatch};
pub use config::{CorpusConfig, SearchOptions};
pub use engine::Corpus;
pub use record::{ChapterView, SearchRecord};
pub use task::TaskGuard;

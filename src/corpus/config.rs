//! Configuration for corpus loading and searching.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::corpus::task::TaskGuard;
use crate::error::{CorpusError, Result};

/// Maximum number of chapter files read concurrently while loading.
pub const DEFAULT_MAX_OPEN_FILES: usize = 25;

/// Maximum number of chapter scans in flight during one search.
pub const DEFAULT_MAX_CONCURRENT_SEARCHES: usize = 100;

/// Configuration for a [`Corpus`](crate::corpus::Corpus).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Size of the worker pool that reads chapter files.
    pub max_open_files: usize,

    /// Size of the worker pool that scans chapters during a search.
    pub max_concurrent_searches: usize,

    /// Default cap on the number of matches a search returns.
    /// If None, every match is returned.
    pub max_results: Option<usize>,

    /// Deadline for the whole load phase.
    pub load_timeout: Option<Duration>,

    /// Whether construction succeeds when some chapters fail to load.
    pub allow_partial_load: bool,

    /// File extension (without the dot) that marks a chapter file.
    pub extension: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            max_open_files: DEFAULT_MAX_OPEN_FILES,
            max_concurrent_searches: DEFAULT_MAX_CONCURRENT_SEARCHES,
            max_results: None,
            load_timeout: None,
            allow_partial_load: false,
            extension: "txt".to_string(),
        }
    }
}

impl CorpusConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CorpusError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: CorpusConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used to build a corpus.
    pub fn validate(&self) -> Result<()> {
        if self.max_open_files == 0 {
            return Err(CorpusError::invalid_config(
                "max_open_files must be greater than zero",
            ));
        }
        if self.max_concurrent_searches == 0 {
            return Err(CorpusError::invalid_config(
                "max_concurrent_searches must be greater than zero",
            ));
        }
        if self.extension.is_empty() {
            return Err(CorpusError::invalid_config("extension must not be empty"));
        }
        Ok(())
    }

    /// Set the load pool size.
    pub fn with_max_open_files(mut self, max_open_files: usize) -> Self {
        self.max_open_files = max_open_files;
        self
    }

    /// Set the search pool size.
    pub fn with_max_concurrent_searches(mut self, max: usize) -> Self {
        self.max_concurrent_searches = max;
        self
    }

    /// Set the default result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Set the load deadline.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    /// Set whether failed chapters are tolerated.
    pub fn with_allow_partial_load(mut self, allow: bool) -> Self {
        self.allow_partial_load = allow;
        self
    }

    /// Set the chapter file extension.
    pub fn with_extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Options for a specific search request.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Cap on returned matches; overrides the corpus default.
    pub max_results: Option<usize>,

    /// Timeout for this specific search.
    pub timeout: Option<Duration>,

    /// External cancellation signal.
    pub guard: Option<TaskGuard>,
}

impl SearchOptions {
    /// Create options with no cap, timeout or guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Set the timeout for this search.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a cancellation guard.
    pub fn with_guard(mut self, guard: TaskGuard) -> Self {
        self.guard = Some(guard);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CorpusConfig::default();
        assert_eq!(config.max_open_files, 25);
        assert_eq!(config.max_concurrent_searches, 100);
        assert_eq!(config.max_results, None);
        assert_eq!(config.load_timeout, None);
        assert!(!config.allow_partial_load);
        assert_eq!(config.extension, "txt");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_pools() {
        let config = CorpusConfig::default().with_max_open_files(0);
        assert!(matches!(
            config.validate(),
            Err(CorpusError::InvalidConfig(_))
        ));

        let config = CorpusConfig::default().with_max_concurrent_searches(0);
        assert!(config.validate().is_err());

        let config = CorpusConfig::default().with_extension("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(&path, r#"{ "max_open_files": 4, "max_results": 10 }"#).unwrap();

        let config = CorpusConfig::from_json_file(&path).unwrap();
        assert_eq!(config.max_open_files, 4);
        assert_eq!(config.max_results, Some(10));
        assert_eq!(config.max_concurrent_searches, 100);
        assert_eq!(config.extension, "txt");
    }

    #[test]
    fn test_from_json_file_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(&path, r#"{ "max_concurrent_searches": 0 }"#).unwrap();
        assert!(CorpusConfig::from_json_file(&path).is_err());

        let missing = dir.path().join("missing.json");
        assert!(CorpusConfig::from_json_file(missing).is_err());
    }

    #[test]
    fn test_search_options_builder() {
        let options = SearchOptions::new()
            .with_max_results(5)
            .with_timeout(Duration::from_secs(2))
            .with_guard(TaskGuard::new());

        assert_eq!(options.max_results, Some(5));
        assert_eq!(options.timeout, Some(Duration::from_secs(2)));
        assert!(options.guard.is_some());
    }
}

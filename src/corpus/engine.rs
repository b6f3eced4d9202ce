//! The in-memory corpus and its search entry points.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::corpus::chapter::{Chapter, LineMatch};
use crate::corpus::config::{CorpusConfig, SearchOptions};
use crate::corpus::loader;
use crate::corpus::task::{TaskGuard, Timer, pool_error};
use crate::error::{CorpusError, Result};

/// A loaded, read-only collection of chapters for one language.
///
/// Construction scans and reads the whole tree; afterwards nothing can add,
/// remove or reload chapters, so `search` and `find_original` may be called
/// from any number of threads without locking.
pub struct Corpus {
    root: PathBuf,
    language: String,
    config: CorpusConfig,
    chapters: Vec<Chapter>,
    load_failures: Vec<CorpusError>,
    search_pool: ThreadPool,
}

impl std::fmt::Debug for Corpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corpus")
            .field("root", &self.root)
            .field("language", &self.language)
            .field("chapters", &self.chapters.len())
            .field("load_failures", &self.load_failures.len())
            .finish()
    }
}

impl Corpus {
    /// Load `root/language` with the default configuration.
    pub fn open<P: AsRef<Path>>(root: P, language: &str) -> Result<Self> {
        Self::open_with_config(root, language, CorpusConfig::default())
    }

    /// Load `root/language` with a custom configuration.
    pub fn open_with_config<P: AsRef<Path>>(
        root: P,
        language: &str,
        config: CorpusConfig,
    ) -> Result<Self> {
        Self::open_with_guard(root, language, config, &TaskGuard::new())
    }

    /// Load `root/language`, stopping early if `guard` is cancelled.
    ///
    /// Unless `config.allow_partial_load` is set, any chapter that fails to
    /// load makes construction fail with [`CorpusError::Load`] carrying every
    /// failure.
    pub fn open_with_guard<P: AsRef<Path>>(
        root: P,
        language: &str,
        config: CorpusConfig,
        guard: &TaskGuard,
    ) -> Result<Self> {
        config.validate()?;
        let root = root.as_ref().to_path_buf();
        let timer = Timer::start();

        let mut chapters = loader::scan(&root, language, &config.extension)?;
        let failures = loader::load_all(&mut chapters, &config, guard)?;

        if !failures.is_empty() {
            if !config.allow_partial_load {
                return Err(CorpusError::Load { failures });
            }
            for failure in &failures {
                log::warn!("skipping chapter: {failure}");
            }
        }

        let search_threads = config.max_concurrent_searches.min(chapters.len()).max(1);
        let search_pool = ThreadPoolBuilder::new()
            .num_threads(search_threads)
            .thread_name(|i| format!("corpus-search-{i}"))
            .build()
            .map_err(pool_error("search"))?;

        let corpus = Self {
            root,
            language: language.to_string(),
            config,
            chapters,
            load_failures: failures,
            search_pool,
        };

        log::info!(
            "loaded {} chapter(s) across {} series for language {} from {} in {:?}",
            corpus.len(),
            corpus.series().len(),
            corpus.language,
            corpus.root.display(),
            timer.elapsed()
        );

        Ok(corpus)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Chapters in scan order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Number of threads scanning chapters during a search.
    pub fn search_threads(&self) -> usize {
        self.search_pool.current_num_threads()
    }

    /// Failures tolerated during a partial load.
    pub fn load_failures(&self) -> &[CorpusError] {
        &self.load_failures
    }

    /// Distinct series names in scan order.
    pub fn series(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for chapter in &self.chapters {
            if names.last() != Some(&chapter.series()) {
                names.push(chapter.series());
            }
        }
        names
    }

    /// Find every line containing `word` in every chapter.
    ///
    /// Matches come back grouped by chapter in scan order, top to bottom
    /// within a chapter. The corpus-wide `max_results` cap, if any, keeps
    /// the first matches in that order.
    pub fn search(&self, word: &str) -> Vec<LineMatch<'_>> {
        let timer = Timer::start();
        let per_chapter: Vec<Vec<LineMatch<'_>>> = self
            .search_pool
            .install(|| self.chapters.par_iter().map(|c| c.find(word)).collect());

        let matches = merge(per_chapter, self.config.max_results);
        log::debug!(
            "search {word:?}: {} match(es) in {:?}",
            matches.len(),
            timer.elapsed()
        );
        matches
    }

    /// Like [`Corpus::search`], with a per-call cap, timeout and
    /// cancellation guard.
    ///
    /// Every chapter task is joined before returning. If any task observed
    /// cancellation or the deadline, the whole search fails with that error.
    pub fn search_with(&self, word: &str, options: &SearchOptions) -> Result<Vec<LineMatch<'_>>> {
        let timer = Timer::start();
        let guard = options
            .guard
            .clone()
            .unwrap_or_default()
            .limited_by(options.timeout);

        let outcomes: Vec<Result<Vec<LineMatch<'_>>>> = self.search_pool.install(|| {
            self.chapters
                .par_iter()
                .map(|chapter| {
                    guard.check(&format!("search for {word:?}"))?;
                    Ok(chapter.find(word))
                })
                .collect()
        });

        let mut per_chapter = Vec::with_capacity(outcomes.len());
        let mut interrupted = None;
        for outcome in outcomes {
            match outcome {
                Ok(found) => per_chapter.push(found),
                Err(e) => {
                    interrupted.get_or_insert(e);
                }
            }
        }
        if let Some(e) = interrupted {
            log::debug!("search {word:?} interrupted after {:?}: {e}", timer.elapsed());
            return Err(e);
        }

        let cap = options.max_results.or(self.config.max_results);
        let matches = merge(per_chapter, cap);
        log::debug!(
            "search {word:?}: {} match(es) in {:?}",
            matches.len(),
            timer.elapsed()
        );
        Ok(matches)
    }

    /// Look up a chapter by its exact series and file name.
    pub fn find_original(&self, series: &str, filename: &str) -> Result<&Chapter> {
        self.chapters
            .iter()
            .find(|c| c.series() == series && c.filename() == filename)
            .ok_or_else(|| CorpusError::chapter_not_found(series, filename))
    }
}

/// Concatenate per-chapter matches in chapter order, keeping at most `cap`.
fn merge<'a>(per_chapter: Vec<Vec<LineMatch<'a>>>, cap: Option<usize>) -> Vec<LineMatch<'a>> {
    let total: usize = per_chapter.iter().map(Vec::len).sum();
    let limit = cap.unwrap_or(total).min(total);
    let mut merged = Vec::with_capacity(limit);
    for found in per_chapter {
        let room = limit - merged.len();
        if room == 0 {
            break;
        }
        merged.extend(found.into_iter().take(room));
    }
    merged
}

#[cfg(test)]
impl Corpus {
    fn from_chapters(chapters: Vec<Chapter>, config: CorpusConfig) -> Self {
        let search_pool = ThreadPoolBuilder::new()
            .num_threads(config.max_concurrent_searches)
            .build()
            .unwrap();
        Self {
            root: PathBuf::from("out"),
            language: "jp".to_string(),
            config,
            chapters,
            load_failures: Vec::new(),
            search_pool,
        }
    }
}

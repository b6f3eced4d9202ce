//! Corpus discovery and loading.
//!
//! The corpus lives on disk as `root/<language>/<series>/<chapter>.txt`.
//! [`scan`] walks that tree and builds one unloaded [`Chapter`] per chapter
//! file; [`load_all`] then reads every file on a bounded worker pool.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::corpus::chapter::Chapter;
use crate::corpus::config::CorpusConfig;
use crate::corpus::task::{TaskGuard, Timer, pool_error};
use crate::error::{CorpusError, Result};

/// Build the chapter list for `language` under `root` without reading any
/// chapter body.
///
/// Series directories and chapter files are visited in file name order.
/// Any directory that cannot be listed aborts the scan.
pub fn scan(root: &Path, language: &str, extension: &str) -> Result<Vec<Chapter>> {
    if !root.is_dir() {
        return Err(CorpusError::read_dir(
            root,
            io::Error::new(io::ErrorKind::NotFound, "corpus root is not a directory"),
        ));
    }

    let language_dir = root.join(language);
    let mut chapters = Vec::new();

    for series_path in sorted_entries(&language_dir)? {
        if !series_path.is_dir() {
            continue;
        }
        let series = file_name(&series_path);
        let found = scan_series(&series_path, language, &series, extension)?;
        log::debug!("series {series}: {} chapter file(s)", found.len());
        chapters.extend(found);
    }

    Ok(chapters)
}

fn scan_series(
    series_path: &Path,
    language: &str,
    series: &str,
    extension: &str,
) -> Result<Vec<Chapter>> {
    let chapters = sorted_entries(series_path)?
        .into_iter()
        .filter(|path| path.extension() == Some(OsStr::new(extension)) && path.is_file())
        .map(|path| {
            let filename = file_name(&path);
            Chapter::new(language, series, path, &filename)
        })
        .collect();
    Ok(chapters)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .map_err(|e| CorpusError::read_dir(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| CorpusError::read_dir(dir, e))?;
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read every chapter body on a pool of at most `config.max_open_files`
/// threads.
///
/// All chapters are attempted; a failure never stops the others. The
/// returned vector holds every per-chapter failure in scan order. Chapters
/// whose task starts after `guard` is cancelled or expired are not read and
/// report the cancellation instead.
pub fn load_all(
    chapters: &mut [Chapter],
    config: &CorpusConfig,
    guard: &TaskGuard,
) -> Result<Vec<CorpusError>> {
    if chapters.is_empty() {
        return Ok(Vec::new());
    }

    let threads = config.max_open_files.min(chapters.len()).max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("corpus-load-{i}"))
        .build()
        .map_err(pool_error("load"))?;

    let guard = guard.limited_by(config.load_timeout);
    let timer = Timer::start();

    let failures: Vec<CorpusError> = pool.install(|| {
        chapters
            .par_iter_mut()
            .map(|chapter| {
                guard.check(&format!("loading {}", chapter.path().display()))?;
                chapter.load()
            })
            .filter_map(|outcome| outcome.err())
            .collect()
    });

    log::debug!(
        "read {} chapter file(s) on {threads} thread(s) in {:?}, {} failure(s)",
        chapters.len(),
        timer.elapsed(),
        failures.len()
    );

    Ok(failures)
}

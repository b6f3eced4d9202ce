//! Chapters and line matches.

use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::record::{ChapterView, SearchRecord};
use crate::error::{CorpusError, Result};

/// One text file of the corpus.
///
/// A chapter is created by the loader before its file is read; `body` and
/// `title` stay empty until the loader reads the file. After the corpus is
/// built the chapter cannot be modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    language: String,
    series: String,
    path: PathBuf,
    filename: String,
    body: String,
    title: String,
}

impl Chapter {
    /// Create an unloaded chapter.
    pub(crate) fn new(language: &str, series: &str, path: PathBuf, filename: &str) -> Self {
        Self {
            language: language.to_string(),
            series: series.to_string(),
            path,
            filename: filename.to_string(),
            body: String::new(),
            title: String::new(),
        }
    }

    /// Read the file and derive the title from its first line.
    pub(crate) fn load(&mut self) -> Result<()> {
        let body =
            fs::read_to_string(&self.path).map_err(|e| CorpusError::chapter_load(&self.path, e))?;
        self.set_body(body);
        Ok(())
    }

    fn set_body(&mut self, body: String) {
        self.title = body.lines().next().unwrap_or_default().to_string();
        self.body = body;
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Full raw content.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// First line of the body.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Everything after the first newline.
    ///
    /// Empty for a body with a single line (with or without a trailing
    /// newline) and for an empty body.
    pub fn body_without_title(&self) -> &str {
        self.body
            .split_once('\n')
            .map(|(_, rest)| rest)
            .unwrap_or_default()
    }

    pub fn line_count(&self) -> usize {
        self.body.lines().count()
    }

    /// Every non-empty line containing `word`, top to bottom.
    ///
    /// Containment is a plain byte-wise substring test: no case folding and
    /// no word boundaries. An empty `word` matches every non-empty line.
    pub fn find(&self, word: &str) -> Vec<LineMatch<'_>> {
        self.body
            .lines()
            .filter(|line| !line.is_empty() && line.contains(word))
            .map(|line| LineMatch {
                language: &self.language,
                line,
                chapter: self,
            })
            .collect()
    }

    /// Render the chapter the way the reader view expects it.
    pub fn to_view(&self) -> ChapterView {
        ChapterView {
            filename: self.filename.clone(),
            series: self.series.clone(),
            title: self.title.clone(),
            body: self.body_without_title().to_string(),
        }
    }
}

/// A single matching line and the chapter it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch<'a> {
    pub language: &'a str,
    pub line: &'a str,
    pub chapter: &'a Chapter,
}

impl LineMatch<'_> {
    /// Owned, serialisable copy of this match.
    pub fn to_record(&self) -> SearchRecord {
        SearchRecord {
            language: self.language.to_string(),
            filename: self.chapter.filename().to_string(),
            series: self.chapter.series().to_string(),
            chapter: self.chapter.title().to_string(),
            line: self.line.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) fn loaded(series: &str, filename: &str, body: &str) -> Chapter {
    let mut chapter = Chapter::new(
        "jp",
        series,
        PathBuf::from(format!("out/jp/{series}/{filename}")),
        filename,
    );
    chapter.set_body(body.to_string());
    chapter
}

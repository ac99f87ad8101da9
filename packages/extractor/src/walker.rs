//! Corpus walker: scans every family page matching a glob pattern.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ExtractorError, Result};
use crate::scanner::{PageScanner, ScanOptions, Warning};
use crate::types::PersonRecord;

type LineScanner = PageScanner<std::vec::IntoIter<String>>;

/// A page the walker could not read.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: ExtractorError,
}

/// A scanner warning together with the page it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWarning {
    pub source: String,
    pub warning: Warning,
}

impl fmt::Display for PageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source, self.warning)
    }
}

/// Lazy iterator over the persons of every page matching a pattern.
///
/// Pages are visited in the order the filesystem glob yields them; all
/// records of one page are contiguous. Each record's `source` is the page's
/// file name. Unreadable pages are logged, remembered in
/// [`skipped`](Self::skipped) and do not stop the walk.
pub struct CorpusWalker {
    paths: glob::Paths,
    options: ScanOptions,
    current: Option<(String, LineScanner)>,
    skipped: Vec<SkippedFile>,
    warnings: Vec<PageWarning>,
}

impl CorpusWalker {
    /// Walk all files matching `pattern`.
    ///
    /// # Errors
    /// `ExtractorError::InvalidPattern` if the pattern is malformed.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            paths: glob::glob(pattern)?,
            options: ScanOptions::default(),
            current: None,
            skipped: Vec::new(),
            warnings: Vec::new(),
        })
    }

    /// Walk files matching `pattern` inside `dir`.
    ///
    /// The directory part is escaped so that glob metacharacters in it are
    /// taken literally.
    ///
    /// # Errors
    /// `ExtractorError::InvalidPattern` if the pattern is malformed.
    pub fn in_dir(dir: &Path, pattern: &str) -> Result<Self> {
        let dir = glob::Pattern::escape(&dir.to_string_lossy());
        Self::new(&format!("{dir}/{pattern}"))
    }

    /// Use explicit scan options for every page.
    #[must_use]
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Pages that could not be read so far.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Warnings of fully scanned pages so far.
    #[must_use]
    pub fn warnings(&self) -> &[PageWarning] {
        &self.warnings
    }

    /// Record a page that failed to read.
    fn skip(&mut self, path: PathBuf, source: std::io::Error) {
        let error = ExtractorError::UnreadableFile {
            path: path.clone(),
            source,
        };
        warn!("{error}");
        self.skipped.push(SkippedFile { path, error });
    }

    /// Move to the next readable page. Returns `false` when none are left.
    fn advance(&mut self) -> bool {
        while let Some(entry) = self.paths.next() {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    let path = e.path().to_path_buf();
                    self.skip(path, e.into_error());
                    continue;
                }
            };

            match read_lines(&path) {
                Ok(lines) => {
                    debug!(path = %path.display(), lines = lines.len(), "Scanning page");
                    let scanner = PageScanner::with_options(lines, self.options);
                    self.current = Some((source_name(&path), scanner));
                    return true;
                }
                Err(source) => self.skip(path, source),
            }
        }
        false
    }
}

impl Iterator for CorpusWalker {
    type Item = PersonRecord;

    fn next(&mut self) -> Option<PersonRecord> {
        loop {
            if let Some((source, scanner)) = &mut self.current {
                if let Some(person) = scanner.next() {
                    return Some(person.with_source(source.as_str()));
                }
            }

            if let Some((source, scanner)) = self.current.take() {
                self.warnings
                    .extend(scanner.into_warnings().into_iter().map(|warning| PageWarning {
                        source: source.clone(),
                        warning,
                    }));
            }

            if !self.advance() {
                return None;
            }
        }
    }
}

/// Read a whole page and split it into lines.
///
/// Pages are mostly but not always valid UTF-8; invalid sequences are
/// replaced rather than failing the page.
fn read_lines(path: &Path) -> std::io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(String::from)
        .collect())
}

/// Identifier of a page: its file name.
fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

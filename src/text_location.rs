//! Text location tracking for anchors and error reporting.

use std::fmt;
use std::path::{Path, PathBuf};

/// A line within a source document.
///
/// Displays as `file:line`, which is also the form used inside anchors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextLocation {
    /// The document path, relative to the input root when discovered.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
}

impl TextLocation {
    /// Creates a new TextLocation.
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Returns the same file at another line.
    pub fn at_line(&self, line: usize) -> Self {
        Self {
            file: self.file.clone(),
            line,
        }
    }

    /// Returns the document path.
    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

//! Occurrences: the physical appearances of a chunk body.

use std::path::Path;

use crate::text_location::TextLocation;

/// One appearance of a chunk body in a document.
///
/// Frozen once the chunk is closed. Besides the raw text it keeps the
/// document line of every body line, so diagnostics can point at the exact
/// source line even when directive lines such as `@shebang` were dropped
/// from the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    location: TextLocation,
    text: String,
    line_numbers: Vec<usize>,
}

impl Occurrence {
    /// Returns the location of the chunk-open line.
    pub fn location(&self) -> &TextLocation {
        &self.location
    }

    /// Returns the source document.
    pub fn source(&self) -> &Path {
        &self.location.file
    }

    /// Returns the line of the chunk-open directive.
    pub fn line(&self) -> usize {
        self.location.line
    }

    /// Returns the line `offset` body lines below the open line.
    pub fn shifted_line(&self, offset: usize) -> usize {
        self.location.line + offset
    }

    /// Returns the line the close anchor points at.
    ///
    /// Counted from the open line over the stored body, so it is the line of
    /// the closing `@` unless a directive line was dropped from the body.
    pub fn end_line(&self) -> usize {
        self.shifted_line(self.line_count() + 1)
    }

    /// Returns the raw body text; every line ends with `\n`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Iterates over body lines paired with their document line numbers.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.line_numbers.iter().copied().zip(self.text.lines())
    }

    /// Returns the number of body lines.
    pub fn line_count(&self) -> usize {
        self.line_numbers.len()
    }

    /// Returns true if the body has no lines.
    pub fn is_empty(&self) -> bool {
        self.line_numbers.is_empty()
    }
}

/// Accumulates body lines while a chunk is open.
#[derive(Debug, Clone)]
pub struct OccurrenceBuilder {
    location: TextLocation,
    text: String,
    line_numbers: Vec<usize>,
}

impl OccurrenceBuilder {
    /// Starts an empty occurrence at the chunk-open line.
    pub fn new(location: TextLocation) -> Self {
        Self {
            location,
            text: String::new(),
            line_numbers: Vec::new(),
        }
    }

    /// Returns the location of the chunk-open line.
    pub fn location(&self) -> &TextLocation {
        &self.location
    }

    /// Appends one body line found at `line_number`.
    pub fn push_line(&mut self, line_number: usize, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
        self.line_numbers.push(line_number);
    }

    /// Freezes the body.
    pub fn finish(self) -> Occurrence {
        Occurrence {
            location: self.location,
            text: self.text,
            line_numbers: self.line_numbers,
        }
    }
}

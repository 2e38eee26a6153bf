//! Line recognition rules for sphweb documents.
//!
//! Every directive in a document occupies a whole line:
//!
//! ```text
//! @<name@> = lang        open a fragment chunk (`=+` extends it)
//! @(file.c@) = c         open a file chunk
//! @shebang #!/bin/sh     shebang for the enclosing file chunk
//! @                      close the current chunk
//!     @<name@>;          reference, inside a chunk body
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::model::ChunkKind;

/// Opening line of a fragment chunk.
pub static FRAGMENT_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*@<(?P<name>[^>]+)@>\s*(?P<op>=\+?)\s*(?P<lang>[^\s+]\S*)\s*$").unwrap()
});

/// Opening line of a file chunk.
pub static FILE_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*@\((?P<name>[^)]+)@\)\s*(?P<op>=\+?)\s*(?P<lang>[^\s+]\S*)\s*$").unwrap()
});

/// A line holding only `@`.
pub static CHUNK_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*@\s*$").unwrap());

/// `@shebang <text>` directive.
pub static SHEBANG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*@shebang\s*(?P<shebang>.*)$").unwrap());

/// Reference to another chunk, with its indentation and trailing text.
pub static CHUNK_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent>\s*)@<(?P<name>[^>]+)@>(?P<trailing>.*)$").unwrap()
});

/// How a chunk-open line attaches its body to a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`: create a new chunk.
    Define,
    /// `=+`: append an occurrence to an existing chunk.
    Extend,
}

impl Operator {
    fn parse(op: &str) -> Self {
        if op == "=+" {
            Operator::Extend
        } else {
            Operator::Define
        }
    }

    /// Returns the operator as written in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Define => "=",
            Operator::Extend => "=+",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A matched chunk-open line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOpen<'a> {
    /// Registry the chunk belongs to.
    pub kind: ChunkKind,
    /// Chunk name, trimmed.
    pub name: &'a str,
    /// Define or extend.
    pub operator: Operator,
    /// Language tag.
    pub language: &'a str,
}

/// Classification of a single document line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRule<'a> {
    /// Fragment or file chunk-open line.
    Open(ChunkOpen<'a>),
    /// End of the current chunk.
    Close,
    /// Shebang directive with its text.
    Shebang(&'a str),
    /// Anything else: prose outside chunks, body text inside.
    Text,
}

/// Classifies a line against the directive rules.
///
/// Chunk references are not directives; they are body text and are
/// recognized by [`parse_chunk_ref`] at expansion time.
pub fn classify_line(line: &str) -> LineRule<'_> {
    if CHUNK_CLOSE.is_match(line) {
        return LineRule::Close;
    }
    if let Some(caps) = SHEBANG.captures(line) {
        let text = caps.name("shebang").map_or("", |m| m.as_str());
        return LineRule::Shebang(text.trim_end());
    }
    if let Some(caps) = FRAGMENT_OPEN.captures(line) {
        return LineRule::Open(chunk_open(ChunkKind::Fragment, &caps));
    }
    if let Some(caps) = FILE_OPEN.captures(line) {
        return LineRule::Open(chunk_open(ChunkKind::File, &caps));
    }
    LineRule::Text
}

fn chunk_open<'a>(kind: ChunkKind, caps: &Captures<'a>) -> ChunkOpen<'a> {
    let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());
    ChunkOpen {
        kind,
        name: group("name").trim(),
        operator: Operator::parse(group("op")),
        language: group("lang"),
    }
}

/// A reference line split around its `@<name@>` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRef<'a> {
    /// Everything before the marker.
    pub indent: &'a str,
    /// Referenced chunk name, trimmed.
    pub name: &'a str,
    /// Everything after the marker.
    pub trailing: &'a str,
}

/// Matches a body line against the reference rule.
pub fn parse_chunk_ref(line: &str) -> Option<ChunkRef<'_>> {
    let caps = CHUNK_REF.captures(line)?;
    let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());
    Some(ChunkRef {
        indent: group("indent"),
        name: group("name").trim(),
        trailing: group("trailing"),
    })
}

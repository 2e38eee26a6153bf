//! Chunk names.

use std::fmt;

use serde::Serialize;

/// The name of a chunk: a fragment name or an output file name.
///
/// Names are stored trimmed, so `@< body @>` and `@<body@>` refer to the
/// same chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ChunkName(String);

impl ChunkName {
    /// Creates a new ChunkName, trimming surrounding blank space.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.len() == name.len() {
            Self(name)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChunkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChunkName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ChunkName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for ChunkName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

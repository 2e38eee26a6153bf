//! Chunk representation.

use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;

use super::chunk_name::ChunkName;
use super::occurrence::Occurrence;

/// Which registry a chunk lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Reusable code fragment, `@<name@>`.
    Fragment,
    /// Output file, `@(name@)`.
    File,
}

impl ChunkKind {
    /// Returns the kind as a lowercase word.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkKind::Fragment => "fragment",
            ChunkKind::File => "file",
        }
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a chunk across both registries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ChunkKey {
    pub kind: ChunkKind,
    pub name: ChunkName,
}

impl ChunkKey {
    pub fn new(kind: ChunkKind, name: ChunkName) -> Self {
        Self { kind, name }
    }

    pub fn fragment(name: impl Into<ChunkName>) -> Self {
        Self::new(ChunkKind::Fragment, name.into())
    }

    pub fn file(name: impl Into<ChunkName>) -> Self {
        Self::new(ChunkKind::File, name.into())
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ChunkKind::Fragment => write!(f, "@<{}@>", self.name),
            ChunkKind::File => write!(f, "@({}@)", self.name),
        }
    }
}

/// Kind-specific chunk data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkVariant {
    Fragment,
    File {
        /// Line written verbatim before the rendered body.
        shebang: Option<String>,
    },
}

impl ChunkVariant {
    /// Returns the registry tag for this variant.
    pub fn kind(&self) -> ChunkKind {
        match self {
            ChunkVariant::Fragment => ChunkKind::Fragment,
            ChunkVariant::File { .. } => ChunkKind::File,
        }
    }
}

/// A named chunk and all of its occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk name, unique within its registry.
    pub name: ChunkName,

    /// Language tag from the first definition; selects the anchor comment style.
    pub language: String,

    /// Fragment or file data.
    pub variant: ChunkVariant,

    /// Occurrences in append order.
    occurrences: Vec<Occurrence>,

    /// Chunks referencing this one (filled by the resolver).
    pub parents: IndexSet<ChunkKey>,

    /// Chunks referenced by this one (filled by the resolver).
    pub children: IndexSet<ChunkKey>,
}

impl Chunk {
    /// Creates a chunk from its first occurrence.
    pub fn new(
        name: ChunkName,
        language: impl Into<String>,
        variant: ChunkVariant,
        first: Occurrence,
    ) -> Self {
        Self {
            name,
            language: language.into(),
            variant,
            occurrences: vec![first],
            parents: IndexSet::new(),
            children: IndexSet::new(),
        }
    }

    /// Creates a fragment chunk.
    pub fn fragment(name: ChunkName, language: impl Into<String>, first: Occurrence) -> Self {
        Self::new(name, language, ChunkVariant::Fragment, first)
    }

    /// Creates a file chunk without a shebang.
    pub fn file(name: ChunkName, language: impl Into<String>, first: Occurrence) -> Self {
        Self::new(name, language, ChunkVariant::File { shebang: None }, first)
    }

    /// Returns the registry tag.
    pub fn kind(&self) -> ChunkKind {
        self.variant.kind()
    }

    /// Returns the key identifying this chunk.
    pub fn key(&self) -> ChunkKey {
        ChunkKey::new(self.kind(), self.name.clone())
    }

    /// Returns the shebang of a file chunk.
    pub fn shebang(&self) -> Option<&str> {
        match &self.variant {
            ChunkVariant::File { shebang } => shebang.as_deref(),
            ChunkVariant::Fragment => None,
        }
    }

    /// Records a shebang, returning the one it replaces.
    ///
    /// Fragments cannot carry a shebang; `None` is returned and nothing changes.
    pub fn set_shebang(&mut self, text: impl Into<String>) -> Option<String> {
        match &mut self.variant {
            ChunkVariant::File { shebang } => shebang.replace(text.into()),
            ChunkVariant::Fragment => None,
        }
    }

    /// Returns the occurrences in append order.
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Appends an occurrence (the `=+` operator).
    pub fn append(&mut self, occurrence: Occurrence) {
        self.occurrences.push(occurrence);
    }

    /// Iterates over all body lines of all occurrences.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.occurrences.iter().flat_map(|o| o.text().lines())
    }
}

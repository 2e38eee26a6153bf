//! Chunk registries.

use indexmap::IndexMap;

use super::chunk::{Chunk, ChunkKey, ChunkKind};
use super::chunk_name::ChunkName;
use super::occurrence::Occurrence;
use crate::errors::{Result, SphwebError};

/// A name -> chunk map for one kind of chunk.
///
/// Insertion order is preserved, so iteration follows the order in which
/// documents and lines were encountered.
#[derive(Debug, Clone)]
pub struct Registry {
    kind: ChunkKind,
    chunks: IndexMap<ChunkName, Chunk>,
}

impl Registry {
    /// Creates an empty registry for the given kind.
    #[must_use]
    pub fn new(kind: ChunkKind) -> Self {
        Self {
            kind,
            chunks: IndexMap::new(),
        }
    }

    /// Returns the kind of chunk this registry holds.
    pub fn kind(&self) -> ChunkKind {
        self.kind
    }

    /// Registers a new chunk (the `=` operator).
    ///
    /// Fails with `DuplicateDefinition` if the name is taken.
    pub fn define(&mut self, chunk: Chunk) -> Result<()> {
        debug_assert_eq!(chunk.kind(), self.kind);
        if self.chunks.contains_key(&chunk.name) {
            let location = chunk
                .occurrences()
                .first()
                .map(|o| o.location().clone())
                .ok_or_else(|| SphwebError::Other(format!("chunk `{}` has no occurrence", chunk.name)))?;
            return Err(SphwebError::DuplicateDefinition {
                kind: self.kind,
                name: chunk.name,
                location,
            });
        }
        self.chunks.insert(chunk.name.clone(), chunk);
        Ok(())
    }

    /// Appends an occurrence to an existing chunk (the `=+` operator).
    ///
    /// Fails with `UndefinedExtend` if the name is unknown.
    pub fn extend(&mut self, name: &ChunkName, occurrence: Occurrence) -> Result<&mut Chunk> {
        match self.chunks.get_mut(name) {
            Some(chunk) => {
                chunk.append(occurrence);
                Ok(chunk)
            }
            None => Err(SphwebError::UndefinedExtend {
                kind: self.kind,
                name: name.clone(),
                location: occurrence.location().clone(),
            }),
        }
    }

    /// Gets a chunk by name.
    pub fn get(&self, name: &ChunkName) -> Option<&Chunk> {
        self.chunks.get(name)
    }

    /// Gets a chunk by name, mutably.
    pub fn get_mut(&mut self, name: &ChunkName) -> Option<&mut Chunk> {
        self.chunks.get_mut(name)
    }

    /// Checks if a name is registered.
    pub fn contains(&self, name: &ChunkName) -> bool {
        self.chunks.contains_key(name)
    }

    /// Returns all chunks in registration order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Returns all names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &ChunkName> {
        self.chunks.keys()
    }

    /// Returns the number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if there are no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// The fragment and file registries of one run.
#[derive(Debug, Clone)]
pub struct ChunkStore {
    fragments: Registry,
    files: Registry,
}

impl Default for ChunkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkStore {
    /// Creates a store with two empty registries.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fragments: Registry::new(ChunkKind::Fragment),
            files: Registry::new(ChunkKind::File),
        }
    }

    /// Returns the registry for a kind.
    pub fn registry(&self, kind: ChunkKind) -> &Registry {
        match kind {
            ChunkKind::Fragment => &self.fragments,
            ChunkKind::File => &self.files,
        }
    }

    /// Returns the registry for a kind, mutably.
    pub fn registry_mut(&mut self, kind: ChunkKind) -> &mut Registry {
        match kind {
            ChunkKind::Fragment => &mut self.fragments,
            ChunkKind::File => &mut self.files,
        }
    }

    /// Returns the fragment registry.
    pub fn fragments(&self) -> &Registry {
        &self.fragments
    }

    /// Returns the file registry.
    pub fn files(&self) -> &Registry {
        &self.files
    }

    /// Registers a new chunk in the registry matching its kind.
    pub fn define(&mut self, chunk: Chunk) -> Result<()> {
        self.registry_mut(chunk.kind()).define(chunk)
    }

    /// Appends an occurrence to an existing chunk of the given kind.
    pub fn extend(
        &mut self,
        kind: ChunkKind,
        name: &ChunkName,
        occurrence: Occurrence,
    ) -> Result<&mut Chunk> {
        self.registry_mut(kind).extend(name, occurrence)
    }

    /// Gets a chunk by key.
    pub fn get(&self, key: &ChunkKey) -> Option<&Chunk> {
        self.registry(key.kind).get(&key.name)
    }

    /// Gets a chunk by key, mutably.
    pub fn get_mut(&mut self, key: &ChunkKey) -> Option<&mut Chunk> {
        self.registry_mut(key.kind).get_mut(&key.name)
    }

    /// Resolves a reference by name: fragments first, then files.
    pub fn lookup(&self, name: &ChunkName) -> Option<&Chunk> {
        self.fragments.get(name).or_else(|| self.files.get(name))
    }

    /// Returns every chunk: fragments, then files.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.fragments.chunks().chain(self.files.chunks())
    }

    /// Returns the total number of chunks.
    pub fn len(&self) -> usize {
        self.fragments.len() + self.files.len()
    }

    /// Returns true if both registries are empty.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty() && self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fragment, file, occurrence};

    #[test]
    fn test_define_and_get() {
        let mut store = ChunkStore::new();
        store.define(fragment("body", "return 0;\n")).unwrap();

        let chunk = store.get(&ChunkKey::fragment("body")).unwrap();
        assert_eq!(chunk.occurrences().len(), 1);
        assert!(store.files().is_empty());
    }

    #[test]
    fn test_duplicate_definition() {
        let mut store = ChunkStore::new();
        store.define(fragment("body", "a\n")).unwrap();

        let result = store.define(fragment("body", "b\n"));
        assert!(matches!(
            result,
            Err(SphwebError::DuplicateDefinition { kind: ChunkKind::Fragment, .. })
        ));
    }

    #[test]
    fn test_same_name_in_both_registries() {
        let mut store = ChunkStore::new();
        store.define(fragment("main", "a\n")).unwrap();
        store.define(file("main", "b\n")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_extend() {
        let mut store = ChunkStore::new();
        store.define(fragment("imports", "import os\n")).unwrap();
        store
            .extend(
                ChunkKind::Fragment,
                &ChunkName::new("imports"),
                occurrence("b.sphweb", 3, "import re\n"),
            )
            .unwrap();

        let chunk = store.get(&ChunkKey::fragment("imports")).unwrap();
        assert_eq!(chunk.occurrences().len(), 2);
    }

    #[test]
    fn test_extend_undefined() {
        let mut store = ChunkStore::new();
        let result = store.extend(
            ChunkKind::File,
            &ChunkName::new("out.c"),
            occurrence("doc.sphweb", 7, "x\n"),
        );
        match result {
            Err(SphwebError::UndefinedExtend { kind, name, location }) => {
                assert_eq!(kind, ChunkKind::File);
                assert_eq!(name.as_str(), "out.c");
                assert_eq!(location.line, 7);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_lookup_prefers_fragments() {
        let mut store = ChunkStore::new();
        store.define(file("shared", "from file\n")).unwrap();
        assert_eq!(store.lookup(&ChunkName::new("shared")).unwrap().kind(), ChunkKind::File);

        store.define(fragment("shared", "from fragment\n")).unwrap();
        assert_eq!(
            store.lookup(&ChunkName::new("shared")).unwrap().kind(),
            ChunkKind::Fragment
        );
        assert!(store.lookup(&ChunkName::new("missing")).is_none());
    }

    #[test]
    fn test_registration_order() {
        let mut store = ChunkStore::new();
        store.define(file("c.py", "")).unwrap();
        store.define(file("a.py", "")).unwrap();
        store.define(file("b.py", "")).unwrap();

        let names: Vec<_> = store.files().names().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["c.py", "a.py", "b.py"]);
    }
}

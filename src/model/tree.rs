//! Parent/child links between chunks.
//!
//! Expansion never needs these links; it resolves references by name as it
//! renders. They exist for diagnostics such as the `tree` command.

use std::fmt::Write as _;

use indexmap::IndexSet;
use serde::Serialize;

use crate::errors::{Result, SphwebError};
use crate::patterns::parse_chunk_ref;

use super::chunk::{Chunk, ChunkKey, ChunkKind};
use super::chunk_name::ChunkName;
use super::registry::ChunkStore;

/// Returns the chunks referenced from `chunk`, in order of first reference.
///
/// Every reference line of every occurrence is considered. Fails with
/// `UnresolvedReference` on a name found in neither registry.
pub fn find_children(store: &ChunkStore, chunk: &Chunk) -> Result<Vec<ChunkKey>> {
    let mut children = IndexSet::new();
    for line in chunk.body_lines() {
        if let Some(reference) = parse_chunk_ref(line) {
            let name = ChunkName::new(reference.name);
            let child = store
                .lookup(&name)
                .ok_or_else(|| SphwebError::UnresolvedReference {
                    name: name.clone(),
                    parent: chunk.name.clone(),
                })?;
            children.insert(child.key());
        }
    }
    Ok(children.into_iter().collect())
}

/// Fills the `parents` and `children` sets of every chunk in the store.
///
/// Returns the number of distinct parent -> child links.
pub fn resolve_links(store: &mut ChunkStore) -> Result<usize> {
    let mut links = Vec::new();
    for chunk in store.chunks() {
        for child in find_children(store, chunk)? {
            links.push((chunk.key(), child));
        }
    }

    for (parent, child) in &links {
        if let Some(chunk) = store.get_mut(parent) {
            chunk.children.insert(child.clone());
        }
        if let Some(chunk) = store.get_mut(child) {
            chunk.parents.insert(parent.clone());
        }
    }

    tracing::debug!("Linked {} chunk references", links.len());
    Ok(links.len())
}

/// Fragments that no chunk references.
///
/// Only meaningful after [`resolve_links`].
pub fn unreferenced_fragments(store: &ChunkStore) -> Vec<&Chunk> {
    store
        .fragments()
        .chunks()
        .filter(|c| c.parents.is_empty())
        .collect()
}

/// A reference tree rooted at one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkTree {
    pub kind: ChunkKind,
    pub name: ChunkName,
    /// Set when this chunk is already an ancestor; its children are omitted.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub recursive: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChunkTree>,
}

impl ChunkTree {
    fn leaf(key: &ChunkKey, recursive: bool) -> Self {
        Self {
            kind: key.kind,
            name: key.name.clone(),
            recursive,
            children: Vec::new(),
        }
    }

    /// Returns the key of the root chunk.
    pub fn key(&self) -> ChunkKey {
        ChunkKey::new(self.kind, self.name.clone())
    }

    /// Returns the number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(ChunkTree::size).sum::<usize>()
    }

    /// Renders the tree as indented text, two spaces per level.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out, 0);
        out
    }

    fn write_text(&self, out: &mut String, depth: usize) {
        let marker = if self.recursive { " (recursive)" } else { "" };
        let _ = writeln!(out, "{}{}{}", "  ".repeat(depth), self.key(), marker);
        for child in &self.children {
            child.write_text(out, depth + 1);
        }
    }
}

/// Builds the reference tree below `key` from the resolved links.
///
/// Call [`resolve_links`] first; an unlinked store yields leaves only.
pub fn build_tree(store: &ChunkStore, key: &ChunkKey) -> Result<ChunkTree> {
    let mut path = Vec::new();
    build_subtree(store, key, &mut path)
}

fn build_subtree(store: &ChunkStore, key: &ChunkKey, path: &mut Vec<ChunkKey>) -> Result<ChunkTree> {
    if path.contains(key) {
        return Ok(ChunkTree::leaf(key, true));
    }
    let chunk = store
        .get(key)
        .ok_or_else(|| SphwebError::Other(format!("chunk {} is not registered", key)))?;

    path.push(key.clone());
    let mut node = ChunkTree::leaf(key, false);
    for child in &chunk.children {
        node.children.push(build_subtree(store, child, path)?);
    }
    path.pop();
    Ok(node)
}

//! A tangle run: parse every document, then render every file chunk.

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::io::Transaction;
use crate::model::{
    build_tree, expand_chunk, resolve_links, Chunk, ChunkStore, ChunkTree, UnresolvedReference,
};
use crate::readers::parse_document;

use super::context::Context;

/// Owns the chunk registries for the duration of one run.
#[derive(Debug, Default)]
pub struct Session {
    store: ChunkStore,
    documents: Vec<PathBuf>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the given documents, in order, into a new session.
    pub fn load(ctx: &Context, documents: &[PathBuf]) -> Result<Self> {
        let mut session = Self::new();
        for path in documents {
            let content = ctx.file_cache.read(path)?;
            session.parse(&content, path)?;
        }
        tracing::debug!(
            "Parsed {} documents into {} chunks",
            session.documents.len(),
            session.store.len()
        );
        Ok(session)
    }

    /// Parses one document into the session's registries.
    pub fn parse(&mut self, input: &str, source: &Path) -> Result<usize> {
        let closed = parse_document(input, source, &mut self.store)?;
        self.documents.push(source.to_path_buf());
        Ok(closed)
    }

    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    /// Documents parsed so far, in parse order.
    pub fn documents(&self) -> &[PathBuf] {
        &self.documents
    }

    /// Renders a file chunk into the final text of its output file.
    pub fn render(&self, ctx: &Context, chunk: &Chunk) -> Result<(String, Vec<UnresolvedReference>)> {
        let expansion = expand_chunk(&self.store, chunk, &ctx.config)?;
        let content = ctx.hooks.run_post_render(&expansion.text, chunk)?;
        Ok((content, expansion.unresolved))
    }

    /// Plans one write per file chunk, in registration order.
    ///
    /// Nothing is written; execute the returned transaction to do so.
    pub fn tangle(&self, ctx: &Context) -> Result<TangleResult> {
        let mut result = TangleResult::default();

        for chunk in self.store.files().chunks() {
            let path = ctx.output_path(&chunk.name)?;
            let (content, unresolved) = self.render(ctx, chunk)?;
            result.transaction.write(path, content)?;
            result.unresolved.extend(unresolved);
            result.files += 1;
        }

        if !result.unresolved.is_empty() {
            tracing::warn!(
                "{} unresolved chunk references were expanded to nothing",
                result.unresolved.len()
            );
        }
        Ok(result)
    }

    /// Links all chunks and builds the reference tree of every file chunk.
    pub fn chunk_trees(&mut self) -> Result<Vec<ChunkTree>> {
        resolve_links(&mut self.store)?;
        self.store
            .files()
            .chunks()
            .map(|chunk| build_tree(&self.store, &chunk.key()))
            .collect()
    }
}

/// What a tangle run would do.
#[derive(Debug, Default)]
pub struct TangleResult {
    /// Writes for every file chunk whose output changed.
    pub transaction: Transaction,
    /// References that expanded to nothing.
    pub unresolved: Vec<UnresolvedReference>,
    /// Number of file chunks rendered.
    pub files: usize,
}

/// Tangles every source document of the context.
pub fn tangle_documents(ctx: &Context) -> Result<TangleResult> {
    let documents = ctx.source_files()?;
    tangle_files(ctx, &documents)
}

/// Tangles the given documents only.
pub fn tangle_files(ctx: &Context, documents: &[PathBuf]) -> Result<TangleResult> {
    let session = Session::load(ctx, documents)?;
    session.tangle(ctx)
}

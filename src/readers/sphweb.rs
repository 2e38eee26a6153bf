//! The document parser.
//!
//! A document is read line by line in one of two modes. Outside a chunk every
//! line is prose and is dropped, except a chunk-open line which switches to
//! chunk mode. Inside a chunk, lines accumulate into an occurrence until a
//! lone `@` closes it and registers or extends the chunk.

use std::path::Path;

use crate::errors::{Result, SphwebError};
use crate::model::{Chunk, ChunkKind, ChunkName, ChunkStore, ChunkVariant, OccurrenceBuilder};
use crate::patterns::{classify_line, ChunkOpen, LineRule, Operator};
use crate::text_location::TextLocation;

/// A chunk between its open line and its closing `@`.
struct OpenChunk {
    kind: ChunkKind,
    name: ChunkName,
    operator: Operator,
    language: String,
    shebang: Option<String>,
    builder: OccurrenceBuilder,
}

impl OpenChunk {
    fn new(open: ChunkOpen<'_>, location: TextLocation) -> Self {
        Self {
            kind: open.kind,
            name: ChunkName::new(open.name),
            operator: open.operator,
            language: open.language.to_string(),
            shebang: None,
            builder: OccurrenceBuilder::new(location),
        }
    }

    /// Freezes the occurrence and registers it in the store.
    fn close(self, store: &mut ChunkStore) -> Result<()> {
        let occurrence = self.builder.finish();
        let location = occurrence.location().clone();

        match self.operator {
            Operator::Define => {
                let variant = match self.kind {
                    ChunkKind::Fragment => ChunkVariant::Fragment,
                    ChunkKind::File => ChunkVariant::File {
                        shebang: self.shebang,
                    },
                };
                tracing::debug!("{}: defined {} chunk `{}`", location, self.kind, self.name);
                store.define(Chunk::new(self.name, self.language, variant, occurrence))
            }
            Operator::Extend => {
                let chunk = store.extend(self.kind, &self.name, occurrence)?;
                if let Some(shebang) = self.shebang {
                    if let Some(previous) = chunk.set_shebang(shebang.clone()) {
                        if previous != shebang {
                            tracing::warn!(
                                "{}: shebang of `{}` changed from `{}` to `{}`",
                                location,
                                chunk.name,
                                previous,
                                shebang
                            );
                        }
                    }
                }
                tracing::debug!("{}: extended {} chunk `{}`", location, self.kind, self.name);
                Ok(())
            }
        }
    }
}

/// Parses one document, registering its chunks in `store`.
///
/// `source` is the document identifier written into anchors. Chunk names are
/// global across documents, so a store shared between calls collects chunks
/// from all of them. Returns the number of chunk occurrences closed.
pub fn parse_document(input: &str, source: &Path, store: &mut ChunkStore) -> Result<usize> {
    let mut current: Option<OpenChunk> = None;
    let mut closed = 0;

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let Some(chunk) = current.as_mut() else {
            if let LineRule::Open(open) = classify_line(line) {
                current = Some(OpenChunk::new(open, TextLocation::new(source, line_number)));
            }
            continue;
        };

        match classify_line(line) {
            LineRule::Close => {
                if let Some(chunk) = current.take() {
                    chunk.close(store)?;
                    closed += 1;
                }
            }
            LineRule::Shebang(text) => {
                if chunk.kind == ChunkKind::Fragment {
                    return Err(SphwebError::MisplacedShebang {
                        name: chunk.name.clone(),
                        location: TextLocation::new(source, line_number),
                    });
                }
                // a bare `@shebang` records nothing
                chunk.shebang = (!text.is_empty()).then(|| text.to_string());
            }
            // open lines are ordinary body text inside a chunk
            LineRule::Open(_) | LineRule::Text => chunk.builder.push_line(line_number, line),
        }
    }

    if let Some(chunk) = current {
        tracing::warn!(
            "{}: {} chunk `{}` is never closed and was discarded",
            chunk.builder.location(),
            chunk.kind,
            chunk.name
        );
    }

    Ok(closed)
}

/// Reads a document from disk and parses it, using its path as identifier.
pub fn read_document_file(path: &Path, store: &mut ChunkStore) -> Result<usize> {
    let content = std::fs::read_to_string(path)?;
    parse_document(&content, path, store)
}

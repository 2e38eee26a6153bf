//! Shared test utilities.

use crate::model::{Chunk, ChunkName, Occurrence, OccurrenceBuilder};
use crate::text_location::TextLocation;

/// Creates an occurrence opened at `line`; body lines follow it directly.
pub fn occurrence(file: &str, line: usize, text: &str) -> Occurrence {
    let mut builder = OccurrenceBuilder::new(TextLocation::new(file, line));
    for (i, body_line) in text.lines().enumerate() {
        builder.push_line(line + i + 1, body_line);
    }
    builder.finish()
}

/// Creates a python fragment defined at `doc.sphweb:1`.
pub fn fragment(name: &str, body: &str) -> Chunk {
    Chunk::fragment(ChunkName::new(name), "python", occurrence("doc.sphweb", 1, body))
}

/// Creates a python file chunk defined at `doc.sphweb:1`.
pub fn file(name: &str, body: &str) -> Chunk {
    Chunk::file(ChunkName::new(name), "python", occurrence("doc.sphweb", 1, body))
}

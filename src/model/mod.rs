//! Core model types for sphweb.

mod chunk;
mod chunk_name;
mod expand;
mod occurrence;
mod registry;
mod tree;

pub use chunk::{Chunk, ChunkKey, ChunkKind, ChunkVariant};
pub use chunk_name::ChunkName;
pub use expand::{expand_chunk, CycleDetector, Expansion, UnresolvedReference};
pub use occurrence::{Occurrence, OccurrenceBuilder};
pub use registry::{ChunkStore, Registry};
pub use tree::{build_tree, find_children, resolve_links, unreferenced_fragments, ChunkTree};

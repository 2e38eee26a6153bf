//! sphweb - a literate programming tangle engine
//!
//! Documents interleave prose with named code chunks. Fragment chunks
//! (`@<name@> = lang`) are reusable pieces of code; file chunks
//! (`@(path@) = lang`) become output files. Tangling substitutes every
//! `@<name@>` reference with the referenced chunk, indented to the
//! reference's column, and marks each substituted block with anchor comments
//! pointing back to the document line it came from.
//!
//! # Example
//!
//! ```no_run
//! use sphweb::interface::{tangle_documents, Context};
//!
//! let ctx = Context::from_dir("docs").unwrap();
//! let result = tangle_documents(&ctx).unwrap();
//! result.transaction.execute().unwrap();
//! ```

pub mod commands;
pub mod config;
pub mod errors;
pub mod hooks;
pub mod interface;
pub mod io;
pub mod model;
pub mod patterns;
pub mod readers;
pub mod text_location;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::Config;
pub use errors::{Result, SphwebError};
pub use interface::{Context, Session};
pub use model::{Chunk, ChunkKey, ChunkKind, ChunkName, ChunkStore};

pub use commands::{TangleOptions, TreeOptions};

//! High-level interface for sphweb operations.

mod context;
mod session;

pub use context::Context;
pub use session::{tangle_documents, tangle_files, Session, TangleResult};

//! File access and output writing.

mod file_cache;
mod transaction;

pub use file_cache::{FileCache, RealFileCache, VirtualFS};
pub use transaction::{Action, Create, Transaction, WriteAction};

//! Command implementations behind the `sphweb` binary.

pub mod config;
mod helpers;
pub mod tangle;
pub mod tree;

pub use config::config;
pub use tangle::{tangle, TangleOptions};
pub use tree::{tree, TreeOptions};

//! Error types for sphweb.

use thiserror::Error;

use crate::model::{ChunkKind, ChunkName};
use crate::text_location::TextLocation;

/// Main error type for sphweb operations.
#[derive(Error, Debug)]
pub enum SphwebError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    /// A `=` chunk-open line for a name that is already registered.
    #[error("{kind} chunk `{name}` already defined (operator `=`) at {location}")]
    DuplicateDefinition {
        kind: ChunkKind,
        name: ChunkName,
        location: TextLocation,
    },

    /// A `=+` chunk-open line for a name that was never defined.
    #[error("{kind} chunk `{name}` extended before definition (operator `=+`) at {location}")]
    UndefinedExtend {
        kind: ChunkKind,
        name: ChunkName,
        location: TextLocation,
    },

    #[error("`@shebang` used in fragment chunk `{name}` at {location}; only file chunks take a shebang")]
    MisplacedShebang {
        name: ChunkName,
        location: TextLocation,
    },

    #[error("Chunk `{name}` referenced from `{parent}` is not defined")]
    UnresolvedReference { name: ChunkName, parent: ChunkName },

    #[error("Cycle detected in chunk references: {}", format_cycle(.0))]
    CycleDetected(Vec<ChunkName>),

    #[error("Invalid output target: {0}")]
    InvalidTarget(String),

    #[error("{0}")]
    Other(String),
}

fn format_cycle(names: &[ChunkName]) -> String {
    names
        .iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type alias for sphweb operations.
pub type Result<T> = std::result::Result<T, SphwebError>;

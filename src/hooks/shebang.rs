//! Shebang hook.

use crate::errors::Result;
use crate::model::Chunk;

use super::{Hook, PostRenderResult};

/// Writes the `@shebang` line recorded on a file chunk as the first line of
/// its output.
#[derive(Debug, Clone, Default)]
pub struct ShebangHook;

impl ShebangHook {
    pub fn new() -> Self {
        Self
    }
}

impl Hook for ShebangHook {
    fn name(&self) -> &str {
        "shebang"
    }

    fn post_render(&self, content: &str, chunk: &Chunk) -> Result<Option<PostRenderResult>> {
        let shebang = chunk.shebang().filter(|s| !s.is_empty());
        Ok(shebang.map(|shebang| PostRenderResult {
            prefix: Some(shebang.to_string()),
            content: content.to_string(),
        }))
    }
}

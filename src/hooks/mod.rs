//! Hooks applied to rendered file chunks before they are written.

mod shebang;

pub use shebang::ShebangHook;

use crate::errors::Result;
use crate::model::Chunk;

/// A hook that can amend the rendered text of a file chunk.
pub trait Hook: Send + Sync {
    /// Returns the name of this hook.
    fn name(&self) -> &str;

    /// Processes rendered output before writing.
    ///
    /// Returns `None` when the hook has nothing to add for this chunk.
    fn post_render(&self, content: &str, chunk: &Chunk) -> Result<Option<PostRenderResult>>;
}

/// Result of post-render hook processing.
#[derive(Debug, Clone)]
pub struct PostRenderResult {
    /// Line to put before the output.
    pub prefix: Option<String>,
    /// Modified main content.
    pub content: String,
}

/// Registry of hooks.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn Hook>>,
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.hooks.iter().map(|h| h.name()).collect();
        f.debug_struct("HookRegistry").field("hooks", &names).finish()
    }
}

impl HookRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Creates a registry with the hooks every tangle run needs.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.add(ShebangHook::new());
        registry
    }

    /// Adds a hook to the registry.
    pub fn add<H: Hook + 'static>(&mut self, hook: H) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Runs all post-render hooks, in registration order.
    ///
    /// Prefix lines come out in the order the hooks produced them.
    pub fn run_post_render(&self, content: &str, chunk: &Chunk) -> Result<String> {
        let mut current = content.to_string();
        let mut prefix_parts = Vec::new();

        for hook in &self.hooks {
            if let Some(result) = hook.post_render(&current, chunk)? {
                if let Some(p) = result.prefix {
                    prefix_parts.push(p);
                }
                current = result.content;
            }
        }

        let mut final_content = String::new();
        for p in prefix_parts {
            final_content.push_str(&p);
            final_content.push('\n');
        }
        final_content.push_str(&current);
        Ok(final_content)
    }
}

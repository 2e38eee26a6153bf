//! Tree command: the reference tree of every file chunk.

use crate::errors::{Result, SphwebError};
use crate::interface::{Context, Session};
use crate::model::unreferenced_fragments;

/// Options for the tree command.
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Print JSON instead of indented text.
    pub json: bool,
}

/// Executes the tree command.
pub fn tree(ctx: &Context, options: TreeOptions) -> Result<()> {
    let mut session = Session::load(ctx, &ctx.source_files()?)?;
    let trees = session.chunk_trees()?;

    for fragment in unreferenced_fragments(session.store()) {
        if let Some(first) = fragment.occurrences().first() {
            tracing::warn!("{}: fragment `{}` is never referenced", first.location(), fragment.name);
        }
    }

    if options.json {
        let json = serde_json::to_string_pretty(&trees)
            .map_err(|e| SphwebError::Other(format!("Failed to serialize tree: {}", e)))?;
        println!("{}", json);
    } else {
        for tree in &trees {
            print!("{}", tree.render_text());
        }
    }
    Ok(())
}

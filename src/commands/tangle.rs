//! Tangle command implementation.

use std::path::PathBuf;

use crate::config::AnnotationMethod;
use crate::errors::Result;
use crate::interface::{tangle_files, Context};

use super::helpers::run_transaction;

/// Options for the tangle command.
#[derive(Debug, Clone, Default)]
pub struct TangleOptions {
    /// List the writes without performing them.
    pub dry_run: bool,
    /// Leave out anchor comments regardless of configuration.
    pub naked: bool,
    /// Specific documents to parse (empty means all source files).
    pub files: Vec<PathBuf>,
}

/// Executes the tangle command.
pub fn tangle(ctx: &mut Context, options: TangleOptions) -> Result<()> {
    if options.naked {
        ctx.config.annotation = AnnotationMethod::Naked;
    }

    let documents = if options.files.is_empty() {
        ctx.source_files()?
    } else {
        ctx.source_files_filtered(&options.files)?
    };
    tracing::info!("Tangling {} documents...", documents.len());

    let result = tangle_files(ctx, &documents)?;
    run_transaction(&result.transaction, options.dry_run, "tangle")?;

    if !options.dry_run {
        tracing::info!(
            "Tangled {} files ({} written, {} unchanged)",
            result.files,
            result.transaction.len(),
            result.transaction.unchanged().len()
        );
    }
    Ok(())
}

//! Shared command helpers.

use crate::errors::Result;
use crate::io::Transaction;

/// Executes a transaction, or only lists it on a dry run.
///
/// `verb` is used for display (e.g. "tangle").
pub fn run_transaction(transaction: &Transaction, dry_run: bool, verb: &str) -> Result<()> {
    if transaction.is_empty() {
        println!("No files to {}.", verb);
        return Ok(());
    }

    if dry_run {
        println!("Would perform {} actions:", transaction.len());
        for desc in transaction.describe() {
            println!("  {}", desc);
        }
        return Ok(());
    }

    transaction.execute()?;
    Ok(())
}

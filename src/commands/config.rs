//! Config command implementation.

use crate::errors::{Result, SphwebError};
use crate::interface::Context;

/// Prints the effective configuration as TOML.
pub fn config(ctx: &Context) -> Result<()> {
    let toml_str = toml::to_string_pretty(&ctx.config)
        .map_err(|e| SphwebError::Other(format!("Failed to serialize config: {}", e)))?;
    print!("{}", toml_str);
    Ok(())
}

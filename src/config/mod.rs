//! Configuration loading and management.

mod annotation_method;
mod config_data;
mod language;
mod markers;
mod templates;

use std::fs;
use std::path::{Path, PathBuf};

pub use annotation_method::AnnotationMethod;
pub use config_data::Config;
pub use language::{Comment, Language};
pub use markers::Markers;
pub use templates::{builtin_languages, find_language};

use crate::errors::{Result, SphwebError};

/// Configuration file names, in order of preference.
const CONFIG_FILES: &[&str] = &["sphweb.toml", ".sphweb.toml"];

/// Finds the configuration file in the given directory or its parents.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for name in CONFIG_FILES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Reads configuration from a TOML file.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| SphwebError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let config: Config = toml::from_str(&content)?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Reads configuration, searching from the given directory.
///
/// If no config file is found, returns the default configuration.
pub fn read_config(start_dir: &Path) -> Result<Config> {
    match find_config_file(start_dir) {
        Some(path) => read_config_file(&path),
        None => Ok(Config::default()),
    }
}

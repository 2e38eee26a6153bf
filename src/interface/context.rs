//! Execution context for sphweb operations.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::config::{read_config, Config};
use crate::errors::{Result, SphwebError};
use crate::hooks::HookRegistry;
use crate::io::{FileCache, RealFileCache};
use crate::model::ChunkName;

/// Configuration, hooks and file access for one run.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub hooks: HookRegistry,
    /// Reads documents; paths are relative to `input_dir`.
    pub file_cache: Arc<dyn FileCache>,
    /// Root the documents are found under.
    pub input_dir: PathBuf,
    /// Root tangled files are written under.
    pub output_dir: PathBuf,
}

impl Context {
    /// Creates a context reading documents from `input_dir`.
    ///
    /// The output directory is the configured `output_dir`, taken relative to
    /// `input_dir`, or `input_dir` itself.
    pub fn new(config: Config, input_dir: impl Into<PathBuf>) -> Self {
        let input_dir = input_dir.into();
        let output_dir = match config.output_dir() {
            Some(dir) => input_dir.join(dir),
            None => input_dir.clone(),
        };
        let file_cache = Arc::new(RealFileCache::new(input_dir.clone()));

        Self {
            config,
            hooks: HookRegistry::with_defaults(),
            file_cache,
            input_dir,
            output_dir,
        }
    }

    /// Creates a context for `input_dir`, reading `sphweb.toml` from it or
    /// one of its parents.
    pub fn from_dir(input_dir: impl Into<PathBuf>) -> Result<Self> {
        let input_dir = input_dir.into();
        let config = read_config(&input_dir)?;
        Ok(Self::new(config, input_dir))
    }

    /// Replaces the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Replaces the file cache documents are read through.
    pub fn with_file_cache(mut self, file_cache: impl FileCache + 'static) -> Self {
        self.file_cache = Arc::new(file_cache);
        self
    }

    /// Returns document paths matching the configured patterns, sorted.
    pub fn source_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for pattern in &self.config.source_patterns {
            glob::Pattern::new(pattern)?;
            files.extend(self.file_cache.glob(pattern)?);
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Restricts the source files to the given paths.
    ///
    /// Paths may be absolute or relative to `input_dir`. A path that is not a
    /// source file is an error.
    pub fn source_files_filtered(&self, filter: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let all_files = self.source_files()?;
        let mut result = Vec::new();

        for path in filter {
            let relative = path.strip_prefix(&self.input_dir).unwrap_or(path.as_path());
            match all_files.iter().find(|f| f.as_path() == relative) {
                Some(found) => result.push(found.clone()),
                None => {
                    return Err(SphwebError::Config(format!(
                        "{} is not a source file (does not match source_patterns)",
                        path.display()
                    )))
                }
            }
        }

        result.sort();
        result.dedup();
        Ok(result)
    }

    /// Returns where the file chunk `name` is written.
    ///
    /// Names must be relative paths that stay inside the output directory.
    pub fn output_path(&self, name: &ChunkName) -> Result<PathBuf> {
        let path = Path::new(name.as_str());
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || path.as_os_str().is_empty() {
            return Err(SphwebError::InvalidTarget(format!(
                "`{}` must be a relative path inside the output directory",
                name
            )));
        }
        Ok(self.output_dir.join(path))
    }
}

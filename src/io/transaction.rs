//! Planned file writes, executed together.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::Result;

/// A file operation that is planned first and executed later.
pub trait Action: std::fmt::Debug + Send + Sync {
    /// Executes the action.
    fn execute(&self) -> Result<()>;

    /// Returns a description of this action.
    fn describe(&self) -> String;
}

/// Create a file that does not exist yet.
#[derive(Debug)]
pub struct Create {
    pub path: PathBuf,
    pub content: String,
}

impl Create {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

impl Action for Create {
    fn execute(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write(&self.path, &self.content)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("create {}", self.path.display())
    }
}

/// Overwrite an existing file with new content.
#[derive(Debug)]
pub struct WriteAction {
    pub path: PathBuf,
    pub content: String,
}

impl WriteAction {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

impl Action for WriteAction {
    fn execute(&self) -> Result<()> {
        atomic_write(&self.path, &self.content)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("write {}", self.path.display())
    }
}

/// A list of actions plus the targets that needed none.
#[derive(Debug, Default)]
pub struct Transaction {
    actions: Vec<Box<dyn Action>>,
    unchanged: Vec<PathBuf>,
}

impl Transaction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action to the transaction.
    pub fn add(&mut self, action: impl Action + 'static) {
        self.actions.push(Box::new(action));
    }

    /// Plans writing `content` to `path`.
    ///
    /// Creates the file if it is missing and overwrites it if it differs;
    /// identical content on disk is left alone.
    pub fn write(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Result<()> {
        let path = path.into();
        let content = content.into();

        match fs::read_to_string(&path) {
            Ok(existing) if existing == content => {
                tracing::debug!("{} is up to date", path.display());
                self.unchanged.push(path);
            }
            Ok(_) => self.add(WriteAction::new(path, content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.add(Create::new(path, content)),
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// Returns the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Targets skipped because their content is already current.
    pub fn unchanged(&self) -> &[PathBuf] {
        &self.unchanged
    }

    /// Returns descriptions of all actions.
    pub fn describe(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.describe()).collect()
    }

    /// Executes all actions in order.
    pub fn execute(&self) -> Result<()> {
        for action in &self.actions {
            tracing::debug!("{}", action.describe());
            action.execute()?;
        }
        Ok(())
    }
}

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes content to a file atomically using a temp file.
fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_path = parent.join(format!(".sphweb-tmp-{}-{}", std::process::id(), counter));

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)
}

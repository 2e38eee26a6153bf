//! Configuration data structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::annotation_method::AnnotationMethod;
use super::language::{Comment, Language};
use super::markers::Markers;

/// Main configuration structure for sphweb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Glob patterns for documents, relative to the input root.
    #[serde(default = "default_source_patterns")]
    pub source_patterns: Vec<String>,

    /// Directory for tangled files; defaults to the input root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Whether tangled output carries anchors.
    #[serde(default)]
    pub annotation: AnnotationMethod,

    /// Comment style for languages found nowhere else.
    #[serde(default)]
    pub default_comment: Comment,

    #[serde(default)]
    pub markers: Markers,

    /// Language configurations, consulted before the built-ins.
    #[serde(default)]
    pub languages: Vec<Language>,
}

fn default_source_patterns() -> Vec<String> {
    vec!["**/*.sphweb".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_patterns: default_source_patterns(),
            output_dir: None,
            annotation: AnnotationMethod::default(),
            default_comment: Comment::default(),
            markers: Markers::default(),
            languages: Vec::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a language by tag, checking configured languages first.
    pub fn find_language(&self, tag: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|l| l.matches(tag))
            .or_else(|| super::templates::find_language(tag))
    }

    /// Returns the comment style for anchors in a chunk of the given language.
    pub fn comment_for(&self, tag: &str) -> Comment {
        match self.find_language(tag) {
            Some(lang) => lang.comment.clone(),
            None => self.default_comment.clone(),
        }
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }
}

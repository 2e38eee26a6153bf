//! Annotation method configuration.

use serde::{Deserialize, Serialize};

/// Whether tangled output carries anchor comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationMethod {
    /// Open, continuation and close anchors around every occurrence.
    #[default]
    Anchored,

    /// Substituted code only.
    Naked,
}

impl AnnotationMethod {
    pub fn has_anchors(&self) -> bool {
        matches!(self, AnnotationMethod::Anchored)
    }
}

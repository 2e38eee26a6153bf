//! Anchor comments tying output lines back to documents.

use serde::{Deserialize, Serialize};

use super::language::Comment;
use crate::model::ChunkName;
use crate::text_location::TextLocation;

/// Words written into continuation and close anchors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    #[serde(default = "default_continues")]
    pub continues: String,

    #[serde(default = "default_end")]
    pub end: String,
}

fn default_continues() -> String {
    "Continues".to_string()
}

fn default_end() -> String {
    "End of".to_string()
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            continues: default_continues(),
            end: default_end(),
        }
    }
}

impl Markers {
    /// `# doc.sphweb:12 <name>`, opening an occurrence.
    pub fn open_anchor(&self, comment: &Comment, at: &TextLocation, name: &ChunkName) -> String {
        comment.wrap(&format!("{} <{}>", at, name))
    }

    /// `# doc.sphweb:14 Continues <name>`, after a substituted reference.
    pub fn continue_anchor(&self, comment: &Comment, at: &TextLocation, name: &ChunkName) -> String {
        comment.wrap(&format!("{} {} <{}>", at, self.continues, name))
    }

    /// `# doc.sphweb:20 End of <name>`, closing an occurrence.
    pub fn end_anchor(&self, comment: &Comment, at: &TextLocation, name: &ChunkName) -> String {
        comment.wrap(&format!("{} {} <{}>", at, self.end, name))
    }
}

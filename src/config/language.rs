//! Languages and their comment styles.

use serde::{Deserialize, Serialize};

/// How a language writes a comment.
///
/// In TOML a line comment is a plain string (`comment = "//"`), a block
/// comment a table (`comment = { open = "/*", close = "*/" }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Comment {
    /// Line comment prefix, e.g. `//` or `#`.
    Line(String),
    /// Block comment delimiters, e.g. `<!--` and `-->`.
    Block { open: String, close: String },
}

impl Comment {
    pub fn line(prefix: impl Into<String>) -> Self {
        Comment::Line(prefix.into())
    }

    pub fn block(open: impl Into<String>, close: impl Into<String>) -> Self {
        Comment::Block {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Wraps text in a comment.
    pub fn wrap(&self, text: &str) -> String {
        match self {
            Comment::Line(prefix) => format!("{} {}", prefix, text),
            Comment::Block { open, close } => format!("{} {} {}", open, text, close),
        }
    }
}

impl Default for Comment {
    fn default() -> Self {
        Comment::Line("#".to_string())
    }
}

/// A language tag and the comment style used for its anchors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Canonical tag, e.g. `python`.
    pub name: String,

    /// Alternative tags, e.g. `py`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<String>,

    pub comment: Comment,
}

impl Language {
    pub fn new(name: impl Into<String>, comment: Comment) -> Self {
        Self {
            name: name.into(),
            identifiers: Vec::new(),
            comment,
        }
    }

    /// Adds alternative tags.
    pub fn with_identifiers(mut self, identifiers: &[&str]) -> Self {
        self.identifiers = identifiers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Checks a chunk's language tag against this language, ignoring case.
    pub fn matches(&self, tag: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag)
            || self.identifiers.iter().any(|id| id.eq_ignore_ascii_case(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(Comment::line("//").wrap("doc.sphweb:1 <a>"), "// doc.sphweb:1 <a>");
        assert_eq!(
            Comment::block("(*", "*)").wrap("doc.sphweb:1 <a>"),
            "(* doc.sphweb:1 <a> *)"
        );
    }

    #[test]
    fn test_matches() {
        let lang = Language::new("python", Comment::line("#")).with_identifiers(&["py", "python3"]);
        assert!(lang.matches("python"));
        assert!(lang.matches("Python"));
        assert!(lang.matches("py"));
        assert!(!lang.matches("rust"));
    }

    #[test]
    fn test_comment_serde() {
        let line: Comment = serde_json::from_str("\"%%\"").unwrap();
        assert_eq!(line, Comment::line("%%"));

        let block: Comment = serde_json::from_str(r#"{"open": "/*", "close": "*/"}"#).unwrap();
        assert_eq!(block, Comment::block("/*", "*/"));
    }
}

//! Expansion of chunk references into final text.

use std::collections::HashSet;

use crate::config::Config;
use crate::errors::{Result, SphwebError};
use crate::patterns::parse_chunk_ref;
use crate::text_location::TextLocation;

use super::chunk::{Chunk, ChunkKey};
use super::chunk_name::ChunkName;
use super::registry::ChunkStore;

/// Cycle detector for preventing infinite recursion during expansion.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    /// Chunks currently being expanded, outermost first.
    stack: Vec<ChunkKey>,
    /// Set for O(1) membership checks.
    seen: HashSet<ChunkKey>,
}

impl CycleDetector {
    /// Creates a new cycle detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a chunk, failing if it is already being expanded.
    pub fn enter(&mut self, key: &ChunkKey) -> Result<()> {
        if self.seen.contains(key) {
            let mut cycle: Vec<ChunkName> = self.stack.iter().map(|k| k.name.clone()).collect();
            cycle.push(key.name.clone());
            return Err(SphwebError::CycleDetected(cycle));
        }
        self.seen.insert(key.clone());
        self.stack.push(key.clone());
        Ok(())
    }

    /// Exits the innermost chunk.
    pub fn exit(&mut self) {
        if let Some(key) = self.stack.pop() {
            self.seen.remove(&key);
        }
    }

    /// Returns the current depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// A reference that named no known chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    /// The missing name.
    pub name: ChunkName,
    /// The chunk containing the reference.
    pub parent: ChunkName,
    /// Where the reference line is.
    pub location: TextLocation,
}

/// The rendered text of a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Final text; every line ends with `\n`.
    pub text: String,
    /// References that were replaced by empty text.
    pub unresolved: Vec<UnresolvedReference>,
}

struct Expander<'a> {
    store: &'a ChunkStore,
    config: &'a Config,
    detector: CycleDetector,
    unresolved: Vec<UnresolvedReference>,
}

/// Renders a chunk with every reference recursively substituted.
///
/// Each occurrence is wrapped in open and close anchors pointing back at
/// its document, and each substituted reference is followed by a
/// continuation anchor at the reference's indentation. Anchor lines are the
/// open line shifted by the number of body lines already processed. With
/// `annotation = "naked"` no anchors are written.
///
/// References to unknown chunks expand to nothing and are reported in
/// [`Expansion::unresolved`]; a reference cycle is an error.
pub fn expand_chunk(store: &ChunkStore, chunk: &Chunk, config: &Config) -> Result<Expansion> {
    let mut expander = Expander {
        store,
        config,
        detector: CycleDetector::new(),
        unresolved: Vec::new(),
    };
    let text = expander.render(chunk)?;
    Ok(Expansion {
        text,
        unresolved: expander.unresolved,
    })
}

impl<'a> Expander<'a> {
    fn render(&mut self, chunk: &Chunk) -> Result<String> {
        self.detector.enter(&chunk.key())?;

        let store = self.store;
        let config = self.config;
        let anchored = config.annotation.has_anchors();
        let comment = config.comment_for(&chunk.language);
        let markers = &config.markers;
        let mut out = String::new();

        for occurrence in chunk.occurrences() {
            let location = occurrence.location();
            if anchored {
                push_line(&mut out, "", &markers.open_anchor(&comment, location, &chunk.name));
            }

            for (shift, (line_number, line)) in occurrence.lines().enumerate() {
                let Some(reference) = parse_chunk_ref(line) else {
                    push_line(&mut out, "", line);
                    continue;
                };

                let name = ChunkName::new(reference.name);
                let child_text = match store.lookup(&name) {
                    Some(child) => self.render(child)?,
                    None => {
                        let at = location.at_line(line_number);
                        tracing::warn!("{}: chunk `{}` is not defined, expanding to nothing", at, name);
                        self.unresolved.push(UnresolvedReference {
                            name,
                            parent: chunk.name.clone(),
                            location: at,
                        });
                        String::new()
                    }
                };

                for child_line in child_text.lines() {
                    push_line(&mut out, reference.indent, child_line);
                }

                let trailing = reference.trailing;
                if !trailing.trim().is_empty() {
                    if anchored || child_text.is_empty() {
                        push_line(&mut out, reference.indent, trailing);
                    } else {
                        // naked output: glue onto the last substituted line
                        out.pop();
                        out.push_str(trailing);
                        out.push('\n');
                    }
                }

                if anchored {
                    let at = location.at_line(occurrence.shifted_line(shift));
                    push_line(
                        &mut out,
                        reference.indent,
                        &markers.continue_anchor(&comment, &at, &chunk.name),
                    );
                }
            }

            if anchored {
                let end = location.at_line(occurrence.end_line());
                push_line(&mut out, "", &markers.end_anchor(&comment, &end, &chunk.name));
            }
        }

        self.detector.exit();
        Ok(out)
    }
}

fn push_line(out: &mut String, indent: &str, line: &str) {
    out.push_str(indent);
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnnotationMethod;
    use crate::model::ChunkKind;
    use crate::readers::parse_document;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn store_from(doc: &str) -> ChunkStore {
        let mut store = ChunkStore::new();
        parse_document(doc, Path::new("doc.sphweb"), &mut store).unwrap();
        store
    }

    fn render_file(store: &ChunkStore, name: &str, config: &Config) -> Expansion {
        let chunk = store.get(&ChunkKey::file(name)).unwrap();
        expand_chunk(store, chunk, config).unwrap()
    }

    fn naked() -> Config {
        Config {
            annotation: AnnotationMethod::Naked,
            ..Config::default()
        }
    }

    #[test]
    fn test_single_occurrence() {
        let store = store_from("@(hello.py@) = python\nprint('hello')\nprint('world')\n@\n");
        let result = render_file(&store, "hello.py", &Config::default());

        assert_eq!(
            result.text,
            "# doc.sphweb:1 <hello.py>\n\
             print('hello')\n\
             print('world')\n\
             # doc.sphweb:4 End of <hello.py>\n"
        );
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn test_main_with_body() {
        let doc = "\
Prose before.
@(out.c@) = c
int main(){
@<body@>
}
@
More prose.
@<body@> = c
return 0;
@
";
        let store = store_from(doc);
        let result = render_file(&store, "out.c", &Config::default());

        assert_eq!(
            result.text,
            "// doc.sphweb:2 <out.c>\n\
             int main(){\n\
             // doc.sphweb:8 <body>\n\
             return 0;\n\
             // doc.sphweb:10 End of <body>\n\
             // doc.sphweb:3 Continues <out.c>\n\
             }\n\
             // doc.sphweb:6 End of <out.c>\n"
        );
    }

    #[test]
    fn test_reference_indentation() {
        let doc = "\
@(main.py@) = python
def main():
    @<helper@>
@
@<helper@> = python
X
Y
@
";
        let store = store_from(doc);

        let naked_result = render_file(&store, "main.py", &naked());
        assert_eq!(naked_result.text, "def main():\n    X\n    Y\n");

        let result = render_file(&store, "main.py", &Config::default());
        assert_eq!(
            result.text,
            "# doc.sphweb:1 <main.py>\n\
             def main():\n    \
             # doc.sphweb:5 <helper>\n    \
             X\n    \
             Y\n    \
             # doc.sphweb:8 End of <helper>\n    \
             # doc.sphweb:2 Continues <main.py>\n\
             # doc.sphweb:4 End of <main.py>\n"
        );
    }

    #[test]
    fn test_nested_indentation() {
        let doc = "\
@(nested.py@) = python
if a:
    @<inner@>
@
@<inner@> = python
if b:
    @<deepest@>
@
@<deepest@> = python
print('deep')
@
";
        let store = store_from(doc);
        let result = render_file(&store, "nested.py", &naked());
        assert_eq!(result.text, "if a:\n    if b:\n        print('deep')\n");
    }

    #[test]
    fn test_trailing_text() {
        let doc = "\
@(call.c@) = c
f(
    @<args@>);
@
@<args@> = c
a,
b
@
";
        let store = store_from(doc);

        let naked_result = render_file(&store, "call.c", &naked());
        assert_eq!(naked_result.text, "f(\n    a,\n    b);\n");

        let result = render_file(&store, "call.c", &Config::default());
        assert_eq!(
            result.text,
            "// doc.sphweb:1 <call.c>\n\
             f(\n    \
             // doc.sphweb:5 <args>\n    \
             a,\n    \
             b\n    \
             // doc.sphweb:8 End of <args>\n    \
             );\n    \
             // doc.sphweb:2 Continues <call.c>\n\
             // doc.sphweb:4 End of <call.c>\n"
        );
    }

    #[test]
    fn test_extended_chunk_renders_every_occurrence() {
        let doc = "\
@(imports.py@) = python
@<imports@>
@
@<imports@> = python
import os
@
@<imports@> =+ python
import re
@
@<imports@> =+ python
import sys
@
";
        let store = store_from(doc);
        let result = render_file(&store, "imports.py", &Config::default());

        assert_eq!(
            result.text,
            "# doc.sphweb:1 <imports.py>\n\
             # doc.sphweb:4 <imports>\n\
             import os\n\
             # doc.sphweb:6 End of <imports>\n\
             # doc.sphweb:7 <imports>\n\
             import re\n\
             # doc.sphweb:9 End of <imports>\n\
             # doc.sphweb:10 <imports>\n\
             import sys\n\
             # doc.sphweb:12 End of <imports>\n\
             # doc.sphweb:1 Continues <imports.py>\n\
             # doc.sphweb:3 End of <imports.py>\n"
        );
    }

    #[test]
    fn test_continuation_anchor_counts_body_lines() {
        let doc = "\
@(out.c@) = c
int main(){
@<body@>
}
@
@<body@> = c
return 0;
@
";
        let store = store_from(doc);
        let result = render_file(&store, "out.c", &Config::default());
        let anchors: Vec<_> = result
            .text
            .lines()
            .filter(|l| l.contains("<out.c>"))
            .collect();
        assert_eq!(
            anchors,
            vec![
                "// doc.sphweb:1 <out.c>",
                "// doc.sphweb:2 Continues <out.c>",
                "// doc.sphweb:5 End of <out.c>",
            ]
        );
    }

    #[test]
    fn test_occurrences_from_different_documents() {
        let mut store = ChunkStore::new();
        parse_document(
            "@(all.py@) = python\n@<imports@>\n@\n@<imports@> = python\nimport os\n@\n",
            Path::new("main.sphweb"),
            &mut store,
        )
        .unwrap();
        parse_document(
            "Prose.\n@<imports@> =+ python\nimport re\n@\n",
            Path::new("regex.sphweb"),
            &mut store,
        )
        .unwrap();
        parse_document(
            "@<imports@> =+ python\nimport sys\nimport json\n@\n",
            Path::new("system.sphweb"),
            &mut store,
        )
        .unwrap();

        let result = render_file(&store, "all.py", &Config::default());
        assert_eq!(
            result.text,
            "# main.sphweb:1 <all.py>\n\
             # main.sphweb:4 <imports>\n\
             import os\n\
             # main.sphweb:6 End of <imports>\n\
             # regex.sphweb:2 <imports>\n\
             import re\n\
             # regex.sphweb:4 End of <imports>\n\
             # system.sphweb:1 <imports>\n\
             import sys\n\
             import json\n\
             # system.sphweb:4 End of <imports>\n\
             # main.sphweb:1 Continues <all.py>\n\
             # main.sphweb:3 End of <all.py>\n"
        );
    }

    #[test]
    fn test_trailing_text_is_kept_verbatim() {
        let doc = "@(list.txt@) = text\n@<item@>  ;  x\n@\n@<item@> = text\na\n@\n";
        let store = store_from(doc);
        let result = render_file(&store, "list.txt", &naked());
        assert_eq!(result.text, "a  ;  x\n");

        let blank = store_from("@(list.txt@) = text\n@<item@>   \n@\n@<item@> = text\na\n@\n");
        assert_eq!(render_file(&blank, "list.txt", &naked()).text, "a\n");
    }

    #[test]
    fn test_unresolved_reference_expands_to_nothing() {
        let doc = "\
@(out.sh@) = bash
echo start
@<missing@>
echo end
@
";
        let store = store_from(doc);
        let result = render_file(&store, "out.sh", &Config::default());

        assert_eq!(
            result.text,
            "# doc.sphweb:1 <out.sh>\n\
             echo start\n\
             # doc.sphweb:2 Continues <out.sh>\n\
             echo end\n\
             # doc.sphweb:5 End of <out.sh>\n"
        );
        assert_eq!(result.unresolved.len(), 1);
        assert_eq!(result.unresolved[0].name.as_str(), "missing");
        assert_eq!(result.unresolved[0].parent.as_str(), "out.sh");
        assert_eq!(result.unresolved[0].location.line, 3);
    }

    #[test]
    fn test_cycle_detection() {
        let doc = "\
@(loop.py@) = python
@<a@>
@
@<a@> = python
@<b@>
@
@<b@> = python
@<a@>
@
";
        let store = store_from(doc);
        let chunk = store.get(&ChunkKey::file("loop.py")).unwrap();
        let result = expand_chunk(&store, chunk, &Config::default());

        match result {
            Err(SphwebError::CycleDetected(cycle)) => {
                let names: Vec<_> = cycle.iter().map(|n| n.as_str()).collect();
                assert_eq!(names, vec!["loop.py", "a", "b", "a"]);
            }
            other => panic!("expected a cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_self_reference() {
        let store = store_from("@(me.py@) = python\n@<me.py@>\n@\n");
        let chunk = store.get(&ChunkKey::file("me.py")).unwrap();
        assert!(matches!(
            expand_chunk(&store, chunk, &Config::default()),
            Err(SphwebError::CycleDetected(_))
        ));
    }

    #[test]
    fn test_reference_used_twice_is_not_a_cycle() {
        let doc = "\
@(twice.py@) = python
@<line@>
@<line@>
@
@<line@> = python
x += 1
@
";
        let store = store_from(doc);
        let result = render_file(&store, "twice.py", &naked());
        assert_eq!(result.text, "x += 1\nx += 1\n");
    }

    #[test]
    fn test_shebang_line_is_not_counted_in_anchors() {
        let doc = "\
@(run.sh@) = bash
@shebang #!/bin/sh
echo one
@<two@>
@
@<two@> = bash
echo two
@
";
        let store = store_from(doc);
        let result = render_file(&store, "run.sh", &Config::default());
        assert!(result.text.contains("# doc.sphweb:2 Continues <run.sh>\n"));
        assert!(result.text.ends_with("# doc.sphweb:4 End of <run.sh>\n"));
        assert!(!result.text.contains("#!/bin/sh"));
    }

    #[test]
    fn test_block_comment_language() {
        let store = store_from("@(index.html@) = html\n<p>hi</p>\n@\n");
        let result = render_file(&store, "index.html", &Config::default());
        assert_eq!(
            result.text,
            "<!-- doc.sphweb:1 <index.html> -->\n\
             <p>hi</p>\n\
             <!-- doc.sphweb:3 End of <index.html> -->\n"
        );
    }

    #[test]
    fn test_file_chunk_can_be_referenced() {
        let doc = "\
@(lib.py@) = python
def f(): pass
@
@(all.py@) = python
@<lib.py@>
@
";
        let store = store_from(doc);
        assert_eq!(store.lookup(&ChunkName::new("lib.py")).unwrap().kind(), ChunkKind::File);
        let result = render_file(&store, "all.py", &naked());
        assert_eq!(result.text, "def f(): pass\n");
    }

    #[test]
    fn test_idempotent() {
        let doc = "@(a.c@) = c\n@<b@>\n@\n@<b@> = c\nint b;\n@\n";
        let first = render_file(&store_from(doc), "a.c", &Config::default());
        let second = render_file(&store_from(doc), "a.c", &Config::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_cycle_detector() {
        let mut detector = CycleDetector::new();

        detector.enter(&ChunkKey::fragment("a")).unwrap();
        detector.enter(&ChunkKey::fragment("b")).unwrap();
        // same name in the other registry is a different chunk
        detector.enter(&ChunkKey::file("a")).unwrap();
        assert_eq!(detector.depth(), 3);

        assert!(detector.enter(&ChunkKey::fragment("a")).is_err());

        detector.exit();
        detector.exit();
        detector.exit();
        assert_eq!(detector.depth(), 0);
    }
}

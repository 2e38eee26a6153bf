//! Built-in language table.

use once_cell::sync::Lazy;

use super::language::{Comment, Language};

static BUILTIN_LANGUAGES: Lazy<Vec<Language>> = Lazy::new(|| {
    vec![
        // C family
        Language::new("c", Comment::line("//")).with_identifiers(&["h"]),
        Language::new("cpp", Comment::line("//")).with_identifiers(&["c++", "cxx", "hpp"]),
        Language::new("java", Comment::line("//")),
        Language::new("javascript", Comment::line("//")).with_identifiers(&["js"]),
        Language::new("typescript", Comment::line("//")).with_identifiers(&["ts"]),
        Language::new("rust", Comment::line("//")).with_identifiers(&["rs"]),
        Language::new("go", Comment::line("//")),
        Language::new("swift", Comment::line("//")),
        Language::new("kotlin", Comment::line("//")).with_identifiers(&["kt"]),
        Language::new("scala", Comment::line("//")),
        Language::new("csharp", Comment::line("//")).with_identifiers(&["cs", "c#"]),
        Language::new("zig", Comment::line("//")),
        Language::new("d", Comment::line("//")),
        Language::new("php", Comment::line("//")),
        Language::new("verilog", Comment::line("//")).with_identifiers(&["v", "sv"]),
        // scripting
        Language::new("python", Comment::line("#")).with_identifiers(&["py", "python3"]),
        Language::new("ruby", Comment::line("#")).with_identifiers(&["rb"]),
        Language::new("perl", Comment::line("#")).with_identifiers(&["pl"]),
        Language::new("bash", Comment::line("#")).with_identifiers(&["sh", "shell", "zsh"]),
        Language::new("r", Comment::line("#")),
        Language::new("julia", Comment::line("#")).with_identifiers(&["jl"]),
        Language::new("nim", Comment::line("#")),
        Language::new("powershell", Comment::line("#")).with_identifiers(&["ps1"]),
        Language::new("yaml", Comment::line("#")).with_identifiers(&["yml"]),
        Language::new("toml", Comment::line("#")),
        Language::new("make", Comment::line("#")).with_identifiers(&["makefile"]),
        Language::new("cmake", Comment::line("#")),
        Language::new("dockerfile", Comment::line("#")).with_identifiers(&["docker"]),
        // lisps
        Language::new("lisp", Comment::line(";")).with_identifiers(&["cl", "elisp"]),
        Language::new("scheme", Comment::line(";")).with_identifiers(&["scm"]),
        Language::new("clojure", Comment::line(";")).with_identifiers(&["clj", "cljs"]),
        Language::new("racket", Comment::line(";")).with_identifiers(&["rkt"]),
        // ML and friends
        Language::new("haskell", Comment::line("--")).with_identifiers(&["hs"]),
        Language::new("elm", Comment::line("--")),
        Language::new("ocaml", Comment::block("(*", "*)")).with_identifiers(&["ml"]),
        Language::new("fsharp", Comment::line("//")).with_identifiers(&["fs", "f#"]),
        Language::new("sql", Comment::line("--")),
        Language::new("lua", Comment::line("--")),
        Language::new("ada", Comment::line("--")),
        Language::new("vhdl", Comment::line("--")),
        // markup
        Language::new("html", Comment::block("<!--", "-->")).with_identifiers(&["htm"]),
        Language::new("xml", Comment::block("<!--", "-->")),
        Language::new("css", Comment::block("/*", "*/")),
        Language::new("scss", Comment::line("//")).with_identifiers(&["sass"]),
        Language::new("tex", Comment::line("%")).with_identifiers(&["latex"]),
        // other
        Language::new("fortran", Comment::line("!")).with_identifiers(&["f90", "f95"]),
        Language::new("erlang", Comment::line("%")).with_identifiers(&["erl"]),
    ]
});

/// Returns the built-in languages.
pub fn builtin_languages() -> &'static [Language] {
    &BUILTIN_LANGUAGES
}

/// Finds a built-in language by tag.
pub fn find_language(tag: &str) -> Option<&'static Language> {
    builtin_languages().iter().find(|lang| lang.matches(tag))
}

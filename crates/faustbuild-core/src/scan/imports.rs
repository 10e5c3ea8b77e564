//! Import directive extraction.
//!
//! Matches `import ( "FILE" ) ;` anywhere in the text. Whitespace, newlines
//! included, may appear between every token. No comment or string awareness:
//! a directive inside a comment still counts, which at worst adds a spurious
//! dependency.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const IMPORT_PATTERN: &str = r#"import\s*\(\s*"([^"]+)"\s*\)\s*;"#;

fn import_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IMPORT_PATTERN).ok()).as_ref()
}

/// A file name named by an `import("...");` directive, not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportToken {
    /// File name exactly as quoted.
    pub name: String,
    /// Line the directive starts on (1-indexed).
    pub line: u32,
}

impl ImportToken {
    #[must_use]
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// Extract import tokens from source text.
///
/// Returns one token per directive in order of appearance. Duplicates are kept.
#[must_use]
pub fn extract_imports(text: &str) -> Vec<ImportToken> {
    let Some(re) = import_regex() else {
        return Vec::new();
    };

    let mut tokens = Vec::new();
    let mut line: u32 = 1;
    let mut counted_to = 0;

    for caps in re.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        line += count_newlines(&text[counted_to..whole.start()]);
        counted_to = whole.start();
        tokens.push(ImportToken::new(name.as_str(), line));
    }

    tokens
}

/// Extract import tokens from raw file bytes.
///
/// Invalid UTF-8 is replaced rather than rejected, so binary input simply
/// yields whatever directives survive decoding (usually none).
#[must_use]
pub fn extract_imports_bytes(bytes: &[u8]) -> Vec<ImportToken> {
    extract_imports(&String::from_utf8_lossy(bytes))
}

fn count_newlines(s: &str) -> u32 {
    s.bytes().filter(|&b| b == b'\n').count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str) -> Vec<String> {
        extract_imports(text).into_iter().map(|t| t.name).collect()
    }

    #[test]
    fn test_compact_form() {
        assert_eq!(names(r#"import("a.dsp");"#), vec!["a.dsp"]);
    }

    #[test]
    fn test_spaced_form() {
        assert_eq!(names(r#"import ( "a.dsp" ) ;"#), vec!["a.dsp"]);
    }

    #[test]
    fn test_split_across_lines() {
        let source = "import\n(\n  \"a.dsp\"\n)\n;";
        assert_eq!(names(source), vec!["a.dsp"]);
    }

    #[test]
    fn test_tabs_and_crlf() {
        let source = "import\t(\r\n\"a.dsp\"\t)\r\n;";
        assert_eq!(names(source), vec!["a.dsp"]);
    }

    #[test]
    fn test_multiple_in_order() {
        let source = r#"
import("stdfaust.lib");
import("filters.lib");
process = _;
import("oscillators.lib");
"#;
        assert_eq!(
            names(source),
            vec!["stdfaust.lib", "filters.lib", "oscillators.lib"]
        );
    }

    #[test]
    fn test_duplicates_preserved() {
        let source = r#"import("a.dsp"); import("a.dsp");"#;
        assert_eq!(names(source), vec!["a.dsp", "a.dsp"]);
    }

    #[test]
    fn test_several_on_one_line() {
        assert_eq!(
            names(r#"import("a.lib");import("b.lib");"#),
            vec!["a.lib", "b.lib"]
        );
    }

    #[test]
    fn test_case_sensitive() {
        assert!(names(r#"Import("a.dsp"); IMPORT("b.dsp");"#).is_empty());
    }

    #[test]
    fn test_requires_semicolon() {
        assert!(names(r#"import("a.dsp")"#).is_empty());
        assert!(names(r#"import("a.dsp") process = _;"#).is_empty());
    }

    #[test]
    fn test_requires_double_quotes() {
        assert!(names("import('a.dsp');").is_empty());
    }

    #[test]
    fn test_empty_name_is_not_a_token() {
        assert!(names(r#"import("");"#).is_empty());
    }

    #[test]
    fn test_comment_without_parentheses() {
        let source = "// we import the oscillators below\nprocess = _;";
        assert!(extract_imports(source).is_empty());
    }

    #[test]
    fn test_empty_source() {
        assert!(extract_imports("").is_empty());
    }

    #[test]
    fn test_line_numbers() {
        let source = "import(\"a.lib\");\n\nimport(\"b.lib\");\nimport\n(\"c.lib\");\nimport(\"d.lib\");";
        let tokens = extract_imports(source);
        let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 3, 4, 6]);
    }

    #[test]
    fn test_path_tokens_kept_verbatim() {
        assert_eq!(
            names(r#"import("../shared/common.lib");"#),
            vec!["../shared/common.lib"]
        );
    }

    #[test]
    fn test_binary_content_yields_nothing() {
        let bytes = [0xff, 0xfe, 0x00, 0x01, 0x80, b'i', b'm', 0x9f];
        assert!(extract_imports_bytes(&bytes).is_empty());
    }

    #[test]
    fn test_bytes_with_invalid_utf8_around_directive() {
        let mut bytes = vec![0xff, 0xfe, b'\n'];
        bytes.extend_from_slice(br#"import("a.lib");"#);
        bytes.push(0x80);
        let tokens = extract_imports_bytes(&bytes);
        assert_eq!(tokens, vec![ImportToken::new("a.lib", 2)]);
    }
}

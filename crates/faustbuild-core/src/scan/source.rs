//! Source scanner: import tokens resolved against the search path.

use super::imports::{extract_imports_bytes, ImportToken};
use super::ResolvePolicy;
use crate::error::Error;
use crate::fs::SourceFs;
use crate::search_path::SearchPath;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A source file as handed to the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Where the document lives. Its directory heads the search order.
    pub path: PathBuf,
    /// Raw contents.
    pub contents: Vec<u8>,
}

impl SourceDocument {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Load a document through `fs`.
    pub fn read(path: &Path, fs: &dyn SourceFs) -> Result<Self, Error> {
        let contents = fs.read(path).map_err(|source| Error::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, contents))
    }

    /// Import directives in this document.
    #[must_use]
    pub fn imports(&self) -> Vec<ImportToken> {
        extract_imports_bytes(&self.contents)
    }
}

/// An import token paired with a file that existed when it was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDependency {
    pub token: ImportToken,
    pub path: PathBuf,
}

/// Resolve the imports of `document` to existing files.
///
/// Each token is joined with every directory of the effective search path:
/// the document's own directory, then `search_path` in order. Directories are
/// canonicalized through `fs` first. Joined paths that exist are returned in
/// token-then-directory order; with [`ResolvePolicy::FirstMatch`] only the
/// first hit per token is kept. Tokens with no hit are dropped.
#[must_use]
pub fn scan_source(
    document: &SourceDocument,
    search_path: &SearchPath,
    fs: &dyn SourceFs,
    policy: ResolvePolicy,
) -> Vec<ResolvedDependency> {
    let tokens = document.imports();
    if tokens.is_empty() {
        return Vec::new();
    }

    let dirs: Vec<PathBuf> = search_path
        .effective_for(&document.path)
        .iter()
        .map(|d| fs.canonical_dir(d))
        .collect();

    let mut resolved = Vec::new();
    for token in tokens {
        let mut hits = 0usize;
        for dir in &dirs {
            let candidate = dir.join(&token.name);
            if !fs.exists(&candidate) {
                continue;
            }
            trace!(token = %token.name, path = %candidate.display(), "import resolved");
            resolved.push(ResolvedDependency {
                token: token.clone(),
                path: candidate,
            });
            hits += 1;
            if policy == ResolvePolicy::FirstMatch {
                break;
            }
        }
        if hits == 0 {
            debug!(
                document = %document.path.display(),
                token = %token.name,
                line = token.line,
                "import not found in search path"
            );
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{MemoryFs, RealFs};
    use std::fs;
    use tempfile::tempdir;

    fn paths(deps: &[ResolvedDependency]) -> Vec<PathBuf> {
        deps.iter().map(|d| d.path.clone()).collect()
    }

    #[test]
    fn test_no_imports_is_empty() {
        let fs = MemoryFs::new().with_file("/proj/voice.dsp", "process = _;");
        let doc = SourceDocument::read(Path::new("/proj/voice.dsp"), &fs).unwrap();
        let deps = scan_source(&doc, &SearchPath::default(), &fs, ResolvePolicy::AllMatches);
        assert!(deps.is_empty());
    }

    #[test]
    fn test_empty_document_is_empty() {
        let fs = MemoryFs::new();
        let doc = SourceDocument::new("/proj/empty.dsp", Vec::new());
        assert!(scan_source(&doc, &SearchPath::default(), &fs, ResolvePolicy::AllMatches).is_empty());
    }

    #[test]
    fn test_resolves_in_document_dir() {
        let fs = MemoryFs::new().with_file("/proj/common.lib", "");
        let doc = SourceDocument::new("/proj/voice.dsp", r#"import("common.lib");"#);
        let deps = scan_source(&doc, &SearchPath::empty(), &fs, ResolvePolicy::AllMatches);
        assert_eq!(paths(&deps), vec![PathBuf::from("/proj/common.lib")]);
        assert_eq!(deps[0].token.name, "common.lib");
    }

    #[test]
    fn test_resolves_in_library_dir() {
        // Search path [docDir, "/lib/a"], file only in /lib/a.
        let fs = MemoryFs::new().with_file("/lib/a/foo.dsp", "");
        let doc = SourceDocument::new("/proj/main.dsp", r#"import("foo.dsp");"#);
        let deps = scan_source(
            &doc,
            &SearchPath::new(["/lib/a"]),
            &fs,
            ResolvePolicy::AllMatches,
        );
        assert_eq!(paths(&deps), vec![PathBuf::from("/lib/a/foo.dsp")]);
    }

    #[test]
    fn test_unresolved_token_dropped() {
        let fs = MemoryFs::new().with_file("/lib/a/known.lib", "");
        let doc = SourceDocument::new(
            "/proj/main.dsp",
            r#"import("missing.lib"); import("known.lib");"#,
        );
        let deps = scan_source(
            &doc,
            &SearchPath::new(["/lib/a"]),
            &fs,
            ResolvePolicy::AllMatches,
        );
        assert_eq!(paths(&deps), vec![PathBuf::from("/lib/a/known.lib")]);
    }

    #[test]
    fn test_all_matches_across_directories() {
        let fs = MemoryFs::new()
            .with_file("/proj/maths.lib", "")
            .with_file("/usr/lib/faust/maths.lib", "");
        let doc = SourceDocument::new("/proj/main.dsp", r#"import("maths.lib");"#);
        let sp = SearchPath::new(["/usr/local/lib/faust", "/usr/lib/faust"]);

        let deps = scan_source(&doc, &sp, &fs, ResolvePolicy::AllMatches);
        assert_eq!(
            paths(&deps),
            vec![
                PathBuf::from("/proj/maths.lib"),
                PathBuf::from("/usr/lib/faust/maths.lib"),
            ]
        );

        let first = scan_source(&doc, &sp, &fs, ResolvePolicy::FirstMatch);
        assert_eq!(paths(&first), vec![PathBuf::from("/proj/maths.lib")]);
    }

    #[test]
    fn test_duplicate_tokens_give_duplicate_entries() {
        let fs = MemoryFs::new().with_file("/proj/a.dsp", "");
        let doc = SourceDocument::new("/proj/main.dsp", r#"import("a.dsp");import("a.dsp");"#);
        let deps = scan_source(&doc, &SearchPath::empty(), &fs, ResolvePolicy::AllMatches);
        assert_eq!(
            paths(&deps),
            vec![PathBuf::from("/proj/a.dsp"), PathBuf::from("/proj/a.dsp")]
        );
    }

    #[test]
    fn test_token_then_directory_order() {
        let fs = MemoryFs::new()
            .with_file("/l1/b.lib", "")
            .with_file("/l2/a.lib", "")
            .with_file("/l1/a.lib", "");
        let doc = SourceDocument::new("/proj/main.dsp", r#"import("a.lib"); import("b.lib");"#);
        let deps = scan_source(
            &doc,
            &SearchPath::new(["/l1", "/l2"]),
            &fs,
            ResolvePolicy::AllMatches,
        );
        assert_eq!(
            paths(&deps),
            vec![
                PathBuf::from("/l1/a.lib"),
                PathBuf::from("/l2/a.lib"),
                PathBuf::from("/l1/b.lib"),
            ]
        );
    }

    #[test]
    fn test_missing_search_dir_skipped() {
        let fs = MemoryFs::new().with_file("/lib/b/x.lib", "");
        let doc = SourceDocument::new("/proj/main.dsp", r#"import("x.lib");"#);
        let deps = scan_source(
            &doc,
            &SearchPath::new(["/does/not/exist", "/lib/b"]),
            &fs,
            ResolvePolicy::AllMatches,
        );
        assert_eq!(paths(&deps), vec![PathBuf::from("/lib/b/x.lib")]);
    }

    #[test]
    fn test_repeated_scans_are_identical() {
        let fs = MemoryFs::new().with_file("/proj/a.lib", "");
        let doc = SourceDocument::new("/proj/main.dsp", r#"import("a.lib");"#);
        let sp = SearchPath::empty();
        let first = scan_source(&doc, &sp, &fs, ResolvePolicy::AllMatches);
        let second = scan_source(&doc, &sp, &fs, ResolvePolicy::AllMatches);
        assert_eq!(first, second);
    }

    #[test]
    fn test_real_fs_returns_canonical_paths() {
        let dir = tempdir().unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("common.lib"), "").unwrap();
        let main = dir.path().join("main.dsp");
        fs::write(&main, r#"import("common.lib");"#).unwrap();

        let doc = SourceDocument::read(&main, &RealFs).unwrap();
        let sp = SearchPath::new([dir.path().join("lib").join("..").join("lib")]);
        let deps = scan_source(&doc, &sp, &RealFs, ResolvePolicy::AllMatches);

        assert_eq!(deps.len(), 1);
        assert!(deps[0].path.is_absolute());
        assert_eq!(
            deps[0].path,
            dunce::canonicalize(&lib).unwrap().join("common.lib")
        );
    }

    #[test]
    fn test_read_missing_document_is_error() {
        let err = SourceDocument::read(Path::new("/proj/none.dsp"), &MemoryFs::new()).unwrap_err();
        assert!(matches!(err, Error::SourceRead { .. }));
    }
}

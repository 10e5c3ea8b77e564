//! Transitive import discovery.
//!
//! The scanner itself only looks one level deep. A host that wants the whole
//! tree re-scans every newly found file until nothing new turns up; this is
//! that loop, for hosts (and the CLI) that do not have their own.

use super::imports::ImportToken;
use super::source::{scan_source, SourceDocument};
use super::ResolvePolicy;
use crate::fs::SourceFs;
use crate::paths::parent_dir;
use crate::search_path::SearchPath;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::debug;

/// An import token that matched no file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedImport {
    /// Document holding the directive.
    pub document: PathBuf,
    pub token: ImportToken,
}

/// Result of walking imports from one root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportClosure {
    /// Reachable files, breadth-first, root excluded.
    pub files: Vec<PathBuf>,
    /// Tokens that resolved nowhere, in discovery order.
    pub unresolved: Vec<UnresolvedImport>,
}

/// Every file reachable from `root` through imports, excluding `root`.
///
/// Breadth-first, so direct imports come before their own imports. Each path
/// appears once even when imported repeatedly or through a cycle. Files that
/// resolve but cannot be read (directories, permission errors) are kept as
/// dependencies but not scanned further.
#[must_use]
pub fn dependency_closure(
    root: &Path,
    search_path: &SearchPath,
    fs: &dyn SourceFs,
    policy: ResolvePolicy,
) -> Vec<PathBuf> {
    scan_closure(root, search_path, fs, policy).files
}

/// [`dependency_closure`], also reporting imports that matched no file.
#[must_use]
pub fn scan_closure(
    root: &Path,
    search_path: &SearchPath,
    fs: &dyn SourceFs,
    policy: ResolvePolicy,
) -> ImportClosure {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    seen.insert(identity(root, fs));

    let mut queue = VecDeque::from([root.to_path_buf()]);
    let mut closure = ImportClosure::default();

    while let Some(path) = queue.pop_front() {
        let document = match SourceDocument::read(&path, fs) {
            Ok(doc) => doc,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping unreadable dependency");
                continue;
            }
        };

        let resolved = scan_source(&document, search_path, fs, policy);
        for token in document.imports() {
            if !resolved.iter().any(|dep| dep.token == token) {
                closure.unresolved.push(UnresolvedImport {
                    document: path.clone(),
                    token,
                });
            }
        }

        for dep in resolved {
            if seen.insert(identity(&dep.path, fs)) {
                closure.files.push(dep.path.clone());
                queue.push_back(dep.path);
            }
        }
    }

    closure
}

/// Key under which a file is de-duplicated: canonical directory + file name.
fn identity(path: &Path, fs: &dyn SourceFs) -> PathBuf {
    let dir = fs.canonical_dir(&parent_dir(path));
    match path.file_name() {
        Some(name) => dir.join(name),
        None => dir,
    }
}

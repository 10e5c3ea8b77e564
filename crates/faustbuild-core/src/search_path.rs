//! Ordered search path for imports and architecture files.

use crate::paths::parent_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Library directories searched after the project directory.
pub const SYSTEM_LIBRARY_DIRS: &[&str] = &["/usr/local/lib/faust", "/usr/lib/faust"];

/// Ordered list of directories. Order is significant: earlier entries are
/// tried first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Create a search path from explicit directories.
    #[must_use]
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// A search path with no directories.
    #[must_use]
    pub fn empty() -> Self {
        Self { dirs: Vec::new() }
    }

    /// The configured directories, in order.
    #[must_use]
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Return a new search path with `dirs` tried before the current entries.
    #[must_use]
    pub fn with_prepended<I, P>(&self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut out: Vec<PathBuf> = dirs.into_iter().map(Into::into).collect();
        out.extend(self.dirs.iter().cloned());
        Self { dirs: out }
    }

    /// Resolve relative entries against `base`. Absolute entries are kept.
    #[must_use]
    pub fn anchored(&self, base: &Path) -> Self {
        Self {
            dirs: self
                .dirs
                .iter()
                .map(|d| if d.is_absolute() { d.clone() } else { base.join(d) })
                .collect(),
        }
    }

    /// Effective search order for `document`: its own directory, then the
    /// configured directories.
    #[must_use]
    pub fn effective_for(&self, document: &Path) -> Vec<PathBuf> {
        let mut out = Vec::with_capacity(self.dirs.len() + 1);
        out.push(parent_dir(document));
        out.extend(self.dirs.iter().cloned());
        out
    }
}

impl Default for SearchPath {
    /// `.`, then the system library directories.
    fn default() -> Self {
        let mut dirs = vec![PathBuf::from(".")];
        dirs.extend(SYSTEM_LIBRARY_DIRS.iter().map(PathBuf::from));
        Self { dirs }
    }
}

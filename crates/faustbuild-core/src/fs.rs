//! Filesystem capability used by the scanners.
//!
//! Scanning only ever asks three questions of the filesystem: does a path
//! exist, what are a file's bytes, and what is a directory's canonical form.
//! Keeping them behind [`SourceFs`] lets tests run against [`MemoryFs`].

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Read-only filesystem access for scanning.
pub trait SourceFs: Send + Sync {
    /// Whether `path` names an existing file or directory.
    fn exists(&self, path: &Path) -> bool;

    /// Read the full contents of a file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Canonical form of a search directory.
    ///
    /// Implementations return `dir` unchanged when it cannot be canonicalized
    /// (for example because it does not exist).
    fn canonical_dir(&self, dir: &Path) -> PathBuf {
        dir.to_path_buf()
    }
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl SourceFs for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn canonical_dir(&self, dir: &Path) -> PathBuf {
        dunce::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
    }
}

/// In-memory filesystem fixture.
///
/// Directories exist implicitly as ancestors of stored files. Paths are
/// compared after lexical normalization (`.` components removed, `..` folded).
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryFs {
    /// Create an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous contents.
    pub fn insert(&mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        self.files.insert(normalize(path.as_ref()), contents.into());
    }

    /// Builder form of [`MemoryFs::insert`].
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Number of stored files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no files are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SourceFs for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.files.contains_key(&path)
            || self.files.keys().any(|f| f.starts_with(&path) && *f != path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(&normalize(path)).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn canonical_dir(&self, dir: &Path) -> PathBuf {
        let dir = normalize(dir);
        if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir
        }
    }
}

/// Lexically normalize a path: drop `.` components and fold `..`.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

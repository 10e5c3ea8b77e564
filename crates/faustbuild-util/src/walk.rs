//! Source discovery.
//!
//! Finds `.dsp` sources under a directory tree in a stable order.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never descended into.
pub const SKIPPED_DIRS: &[&str] = &[".git", "target", "node_modules"];

/// Collect every file under `root` whose name ends with `suffix`.
///
/// Hidden directories and [`SKIPPED_DIRS`] are not descended into. Entries that
/// cannot be read are skipped. Results are sorted by path.
#[must_use]
pub fn find_by_suffix(root: &Path, suffix: &str) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(suffix))
        .map(walkdir::DirEntry::into_path)
        .collect();

    found.sort();
    found
}

/// Collect every `.dsp` source under `root`.
#[must_use]
pub fn find_dsp_sources(root: &Path) -> Vec<PathBuf> {
    find_by_suffix(root, ".dsp")
}

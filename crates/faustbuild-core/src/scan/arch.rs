//! Architecture file lookup for C++ targets.

use crate::fs::SourceFs;
use crate::search_path::SearchPath;
use std::path::PathBuf;
use tracing::debug;

/// File name of the architecture template for `architecture`.
#[must_use]
pub fn architecture_file_name(architecture: &str) -> String {
    format!("{architecture}.cpp")
}

/// Find `<architecture>.cpp` in the configured search directories.
///
/// Unlike [`scan_source`](super::scan_source) there is no document directory
/// in front: only `search_path` is consulted. Every directory holding the file
/// contributes, in search order.
#[must_use]
pub fn scan_architecture(
    architecture: &str,
    search_path: &SearchPath,
    fs: &dyn SourceFs,
) -> Vec<PathBuf> {
    let file_name = architecture_file_name(architecture);
    let found: Vec<PathBuf> = search_path
        .dirs()
        .iter()
        .map(|dir| dir.join(&file_name))
        .filter(|candidate| fs.exists(candidate))
        .collect();

    if found.is_empty() {
        debug!(architecture = %file_name, "architecture file not found in search path");
    }
    found
}

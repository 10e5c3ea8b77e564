use std::path::{Path, PathBuf};

/// File name of the per-project settings file.
pub const SETTINGS_FILE_NAME: &str = "faustbuild.json";

/// Find the nearest settings file by walking up from `cwd`.
///
/// Returns the first `faustbuild.json` found, or `None` at the filesystem root.
#[must_use]
pub fn find_settings_file(cwd: &Path) -> Option<PathBuf> {
    let mut current = cwd.to_path_buf();

    loop {
        let candidate = current.join(SETTINGS_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Path the compiler writes to when only a side artifact is wanted.
#[must_use]
pub fn null_device() -> &'static str {
    if cfg!(windows) {
        "NUL"
    } else {
        "/dev/null"
    }
}

/// Directory containing `path`, with a bare file name mapping to `.`.
#[must_use]
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

//! Makefile-format dependency files.
//!
//! Hosts such as Make or Ninja can consume the scanner's output directly as
//! a depfile: `target: dep1 dep2 ...`.

use crate::error::Error;
use faustbuild_util::fs::write_if_changed;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Render a single-rule depfile, terminated by a newline.
#[must_use]
pub fn render_depfile(target: &Path, deps: &[PathBuf]) -> String {
    let mut out = escape(&target.to_string_lossy());
    out.push(':');
    for dep in deps {
        out.push_str(" \\\n  ");
        out.push_str(&escape(&dep.to_string_lossy()));
    }
    out.push('\n');
    out
}

/// Write a depfile for `target` to `path`.
///
/// The file is replaced atomically and left untouched when its contents
/// would not change. Returns whether it was written.
pub fn write_depfile(path: &Path, target: &Path, deps: &[PathBuf]) -> Result<bool, Error> {
    let content = render_depfile(target, deps);
    let written = write_if_changed(path, content.as_bytes()).map_err(|source| {
        Error::DepfileWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), written, deps = deps.len(), "depfile");
    Ok(written)
}

/// Escape the characters Make treats specially in a prerequisite list.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            ' ' => out.push_str("\\ "),
            '#' => out.push_str("\\#"),
            '$' => out.push_str("$$"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_render_plain() {
        let rendered = render_depfile(
            Path::new("pad.cpp"),
            &[PathBuf::from("/usr/lib/faust/music.lib"), PathBuf::from("pad.lib")],
        );
        assert_eq!(
            rendered,
            "pad.cpp: \\\n  /usr/lib/faust/music.lib \\\n  pad.lib\n"
        );
    }

    #[test]
    fn test_render_no_deps() {
        assert_eq!(render_depfile(Path::new("pad.cpp"), &[]), "pad.cpp:\n");
    }

    #[test]
    fn test_escaping() {
        let rendered = render_depfile(
            Path::new("out dir/pad.cpp"),
            &[PathBuf::from("my libs/#1$.lib")],
        );
        assert_eq!(rendered, "out\\ dir/pad.cpp: \\\n  my\\ libs/\\#1$$.lib\n");
    }

    #[test]
    fn test_write_only_when_changed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pad.cpp.d");
        let deps = vec![PathBuf::from("a.lib")];

        assert!(write_depfile(&path, Path::new("pad.cpp"), &deps).unwrap());
        assert!(!write_depfile(&path, Path::new("pad.cpp"), &deps).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "pad.cpp: \\\n  a.lib\n");

        assert!(write_depfile(&path, Path::new("pad.cpp"), &[]).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "pad.cpp:\n");
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("pad.cpp.d");
        let err = write_depfile(&path, Path::new("pad.cpp"), &[]).unwrap_err();
        assert!(matches!(err, Error::DepfileWrite { .. }));
    }
}

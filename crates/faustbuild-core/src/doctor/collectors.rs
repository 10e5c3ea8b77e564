//! Data collectors for the doctor report.
//!
//! All collectors use only path lookups and `stat`.
//! No subprocesses are spawned.

use super::{codes, ArchitectureInfo, RuntimeInfo, SearchDirInfo, ToolInfo, Warning};
use crate::fs::RealFs;
use crate::scan::scan_architecture;
use crate::settings::FaustSettings;
use crate::version::{SCHEMA_VERSION, VERSION};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locate `name` on the process `PATH`.
///
/// Names containing a path separator are checked as given.
#[must_use]
pub fn tool_path(name: &str) -> Option<PathBuf> {
    match which::which(name) {
        Ok(path) => Some(path),
        Err(e) => {
            debug!(tool = name, error = %e, "tool not found");
            None
        }
    }
}

/// Locate `name` on an explicit `PATH` value, resolving relative names
/// against `cwd`.
#[must_use]
pub fn tool_path_in(name: &str, path_var: &OsStr, cwd: &Path) -> Option<PathBuf> {
    match which::which_in(name, Some(path_var), cwd) {
        Ok(path) => Some(path),
        Err(e) => {
            debug!(tool = name, error = %e, "tool not found");
            None
        }
    }
}

/// Whether the configured compiler can be located.
#[must_use]
pub fn faust_available(settings: &FaustSettings) -> bool {
    tool_path(&settings.compiler).is_some()
}

/// Collect runtime information.
#[must_use]
pub fn collect_runtime() -> RuntimeInfo {
    RuntimeInfo {
        version: VERSION.to_string(),
        schema_version: SCHEMA_VERSION,
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    }
}

/// Locate the compiler.
pub fn collect_compiler(
    settings: &FaustSettings,
    path_var: &OsStr,
    cwd: &Path,
    warnings: &mut Vec<Warning>,
) -> ToolInfo {
    let info = collect_tool(&settings.compiler, path_var, cwd);
    if !info.found() {
        warnings.push(Warning::warn(
            codes::COMPILER_NOT_FOUND,
            format!("Compiler `{}` not found on PATH", settings.compiler),
        ));
    }
    info
}

/// Locate the binding generator. Only needed for `.sc`/`.hs` targets.
pub fn collect_faust2sc(
    settings: &FaustSettings,
    path_var: &OsStr,
    cwd: &Path,
    warnings: &mut Vec<Warning>,
) -> ToolInfo {
    let info = collect_tool(&settings.faust2sc, path_var, cwd);
    if !info.found() {
        warnings.push(Warning::warn(
            codes::FAUST2SC_NOT_FOUND,
            format!(
                "Binding generator `{}` not found on PATH; SuperCollider and Haskell targets will fail",
                settings.faust2sc
            ),
        ));
    }
    info
}

fn collect_tool(name: &str, path_var: &OsStr, cwd: &Path) -> ToolInfo {
    ToolInfo {
        name: name.to_string(),
        path: tool_path_in(name, path_var, cwd),
    }
}

/// Check each search directory.
pub fn collect_search_dirs(
    settings: &FaustSettings,
    warnings: &mut Vec<Warning>,
) -> Vec<SearchDirInfo> {
    settings
        .search_path
        .dirs()
        .iter()
        .map(|dir| {
            let exists = dir.is_dir();
            if !exists {
                warnings.push(Warning::info(
                    codes::SEARCH_DIR_MISSING,
                    format!("Search directory {} does not exist", dir.display()),
                ));
            }
            SearchDirInfo {
                path: dir.clone(),
                exists,
            }
        })
        .collect()
}

/// Find the architecture template in the search directories.
pub fn collect_architecture(
    settings: &FaustSettings,
    warnings: &mut Vec<Warning>,
) -> ArchitectureInfo {
    let matches = scan_architecture(&settings.architecture, &settings.search_path, &RealFs);
    if matches.is_empty() {
        warnings.push(Warning::warn(
            codes::ARCHITECTURE_NOT_FOUND,
            format!(
                "Architecture file {} not found in any search directory",
                settings.architecture_file()
            ),
        ));
    }
    ArchitectureInfo {
        file: settings.architecture_file(),
        matches,
    }
}

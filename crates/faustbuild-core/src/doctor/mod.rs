//! Toolchain diagnostics.
//!
//! Answers "can this machine build `.dsp` files?" without running anything:
//! executables are located on `PATH`, directories and the architecture file
//! are checked for existence.
//!
//! ## Design Principles
//! - No subprocess calls
//! - No network calls
//! - Only path lookups and `stat`

#![allow(clippy::doc_markdown)]

use crate::settings::FaustSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod collectors;

pub use collectors::*;

/// Report schema version. Bump when changing JSON structure.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Warning severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
}

/// A diagnostic warning with a stable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Stable warning code (e.g., `COMPILER_NOT_FOUND`).
    pub code: String,
    pub severity: Severity,
    pub message: String,
}

impl Warning {
    #[must_use]
    pub fn info(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warn(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Warn,
            message: message.into(),
        }
    }
}

/// Stable warning codes. These are part of the public API and must not change.
/// New codes may be added in future versions.
pub mod codes {
    pub const COMPILER_NOT_FOUND: &str = "COMPILER_NOT_FOUND";
    pub const FAUST2SC_NOT_FOUND: &str = "FAUST2SC_NOT_FOUND";
    pub const SEARCH_DIR_MISSING: &str = "SEARCH_DIR_MISSING";
    pub const ARCHITECTURE_NOT_FOUND: &str = "ARCHITECTURE_NOT_FOUND";
}

/// Runtime information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeInfo {
    pub version: String,
    pub schema_version: u32,
    pub os: String,
    pub arch: String,
}

/// Where an executable was looked for and found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Name or path as configured.
    pub name: String,
    /// Resolved location, if any.
    pub path: Option<PathBuf>,
}

impl ToolInfo {
    #[must_use]
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// One configured search directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDirInfo {
    pub path: PathBuf,
    pub exists: bool,
}

/// Architecture template lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitectureInfo {
    /// File name searched for, e.g. `module.cpp`.
    pub file: String,
    /// Every search directory holding it, in search order.
    pub matches: Vec<PathBuf>,
}

/// Complete doctor report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorReport {
    /// Schema version for this report format.
    pub report_schema_version: u32,
    pub cwd: PathBuf,
    pub runtime: RuntimeInfo,
    pub compiler: ToolInfo,
    pub faust2sc: ToolInfo,
    pub search_dirs: Vec<SearchDirInfo>,
    pub architecture: ArchitectureInfo,
    pub warnings: Vec<Warning>,
}

impl DoctorReport {
    /// Collect all diagnostic information for `settings`.
    ///
    /// Tools are resolved against the process `PATH`.
    #[must_use]
    pub fn collect(cwd: &Path, settings: &FaustSettings) -> Self {
        let path_var = std::env::var_os("PATH").unwrap_or_default();
        Self::collect_with_path(cwd, settings, &path_var)
    }

    /// Like [`DoctorReport::collect`], with an explicit `PATH` value.
    #[must_use]
    pub fn collect_with_path(
        cwd: &Path,
        settings: &FaustSettings,
        path_var: &std::ffi::OsStr,
    ) -> Self {
        let mut warnings = Vec::new();

        let runtime = collectors::collect_runtime();
        let compiler = collectors::collect_compiler(settings, path_var, cwd, &mut warnings);
        let faust2sc = collectors::collect_faust2sc(settings, path_var, cwd, &mut warnings);
        let search_dirs = collectors::collect_search_dirs(settings, &mut warnings);
        let architecture = collectors::collect_architecture(settings, &mut warnings);

        Self {
            report_schema_version: REPORT_SCHEMA_VERSION,
            cwd: cwd.to_path_buf(),
            runtime,
            compiler,
            faust2sc,
            search_dirs,
            architecture,
            warnings,
        }
    }

    /// Whether anything at `Warn` severity was reported.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.warnings.iter().any(|w| w.severity == Severity::Warn)
    }
}

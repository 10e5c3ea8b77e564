//! Dependency discovery for `.dsp` sources.
//!
//! - [`extract_imports`] pulls `import("file");` directives out of source text.
//! - [`scan_source`] resolves those tokens against a [`SearchPath`].
//! - [`scan_architecture`] locates the architecture file a C++ target needs.
//! - [`dependency_closure`] repeats [`scan_source`] until no new files appear.
//!
//! None of these cache anything. Every call reads its inputs afresh, so they
//! are safe to run concurrently over many sources.
//!
//! [`SearchPath`]: crate::search_path::SearchPath

mod arch;
mod closure;
mod imports;
mod source;

pub use arch::{architecture_file_name, scan_architecture};
pub use closure::{dependency_closure, scan_closure, ImportClosure, UnresolvedImport};
pub use imports::{extract_imports, extract_imports_bytes, ImportToken};
pub use source::{scan_source, ResolvedDependency, SourceDocument};

use serde::{Deserialize, Serialize};

/// How many search directories a single import token may resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolvePolicy {
    /// Every search directory holding the file contributes a dependency.
    #[default]
    AllMatches,
    /// Only the first search directory holding the file counts.
    FirstMatch,
}

impl ResolvePolicy {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllMatches => "all-matches",
            Self::FirstMatch => "first-match",
        }
    }

    /// Parse the kebab-case name used in settings files and on the command line.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all-matches" => Some(Self::AllMatches),
            "first-match" => Some(Self::FirstMatch),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResolvePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

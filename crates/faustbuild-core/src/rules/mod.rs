//! Build rules for `.dsp` sources.
//!
//! A rule knows its suffixes, how to name a target from a source, which
//! extra outputs it emits and which commands produce the target. Commands
//! are returned as data ([`Step`]); running them is up to the host.
//!
//! | rule            | source     | target      | sources |
//! |-----------------|------------|-------------|---------|
//! | `cpp`           | `.dsp`     | `.cpp`      | one     |
//! | `xml`           | `.dsp`     | `.dsp.xml`  | one     |
//! | `svg`           | `.dsp`     | `.dsp-svg/` | one     |
//! | `supercollider` | `.dsp.xml` | `.sc`       | many    |
//! | `haskell`       | `.dsp.xml` | `.hs`       | many    |

mod command;

pub use command::{steps_for, CommandLine, Step};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File produced inside every SVG target directory.
pub const SVG_PROCESS_FILE: &str = "process.svg";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("{rule} expects a `{expected}` source, got {path}")]
    UnexpectedSource {
        rule: RuleKind,
        expected: &'static str,
        path: PathBuf,
    },

    #[error("{rule} needs at least one source")]
    NoSources { rule: RuleKind },

    #[error("{rule} takes exactly one source, got {count}")]
    TooManySources { rule: RuleKind, count: usize },

    #[error("unknown rule `{0}` (expected cpp, xml, svg, supercollider or haskell)")]
    UnknownRule(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// C++ translation unit built against the architecture template.
    Cpp,
    /// XML description of the DSP interface.
    Xml,
    /// Directory of block-diagram SVGs.
    Svg,
    /// SuperCollider class file generated from `.dsp.xml` descriptions.
    SuperCollider,
    /// Haskell module generated from `.dsp.xml` descriptions.
    Haskell,
}

impl RuleKind {
    /// Every rule, in plan order.
    pub const ALL: [RuleKind; 5] = [
        Self::Cpp,
        Self::Xml,
        Self::Svg,
        Self::SuperCollider,
        Self::Haskell,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpp => "cpp",
            Self::Xml => "xml",
            Self::Svg => "svg",
            Self::SuperCollider => "supercollider",
            Self::Haskell => "haskell",
        }
    }

    /// Parse a rule name. Accepts `sc` and `hs` as short forms.
    pub fn parse(s: &str) -> Result<Self, RuleError> {
        match s {
            "cpp" => Ok(Self::Cpp),
            "xml" => Ok(Self::Xml),
            "svg" => Ok(Self::Svg),
            "supercollider" | "sc" => Ok(Self::SuperCollider),
            "haskell" | "hs" => Ok(Self::Haskell),
            other => Err(RuleError::UnknownRule(other.to_string())),
        }
    }

    /// Suffix a source must carry.
    #[must_use]
    pub fn src_suffix(&self) -> &'static str {
        match self {
            Self::Cpp | Self::Xml | Self::Svg => ".dsp",
            Self::SuperCollider | Self::Haskell => ".dsp.xml",
        }
    }

    /// Suffix of the target.
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Cpp => ".cpp",
            Self::Xml => ".dsp.xml",
            Self::Svg => ".dsp-svg",
            Self::SuperCollider => ".sc",
            Self::Haskell => ".hs",
        }
    }

    /// Whether one target collects many sources.
    #[must_use]
    pub fn is_multi_source(&self) -> bool {
        matches!(self, Self::SuperCollider | Self::Haskell)
    }

    /// Whether the target is a directory rather than a file.
    #[must_use]
    pub fn produces_directory(&self) -> bool {
        matches!(self, Self::Svg)
    }

    /// Whether sources are `.dsp` files that the import scanner applies to.
    #[must_use]
    pub fn scans_imports(&self) -> bool {
        self.src_suffix() == ".dsp"
    }

    /// Check that `source` carries this rule's source suffix.
    pub fn check_source(&self, source: &Path) -> Result<(), RuleError> {
        if self.strip_src_suffix(source).is_some() {
            Ok(())
        } else {
            Err(RuleError::UnexpectedSource {
                rule: *self,
                expected: self.src_suffix(),
                path: source.to_path_buf(),
            })
        }
    }

    /// Default target for `source`: the source suffix swapped for the target suffix.
    pub fn target_for(&self, source: &Path) -> Result<PathBuf, RuleError> {
        let stem = self
            .strip_src_suffix(source)
            .ok_or_else(|| RuleError::UnexpectedSource {
                rule: *self,
                expected: self.src_suffix(),
                path: source.to_path_buf(),
            })?;
        Ok(source.with_file_name(format!("{stem}{}", self.suffix())))
    }

    /// Everything the rule writes for `target`, the target included.
    #[must_use]
    pub fn outputs(&self, target: &Path) -> Vec<PathBuf> {
        let mut out = vec![target.to_path_buf()];
        if self.produces_directory() {
            out.push(target.join(SVG_PROCESS_FILE));
        }
        out
    }

    /// File name of `source` without the source suffix, if it has one.
    fn strip_src_suffix(&self, source: &Path) -> Option<String> {
        let name = source.file_name()?.to_str()?;
        let stem = name.strip_suffix(self.src_suffix())?;
        if stem.is_empty() {
            return None;
        }
        Some(stem.to_string())
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

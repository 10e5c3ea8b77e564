//! Toolchain settings.
//!
//! One immutable value describes which executables to call, which
//! architecture template to compile against and where to look for imports.
//! It is passed explicitly to every scanner and rule; nothing reads ambient
//! process state.

use crate::error::Error;
use crate::paths::{find_settings_file, parent_dir};
use crate::scan::{architecture_file_name, ResolvePolicy};
use crate::search_path::SearchPath;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default compiler executable.
pub const DEFAULT_COMPILER: &str = "faust";

/// Default architecture template base name.
pub const DEFAULT_ARCHITECTURE: &str = "module";

/// Default binding generator executable.
pub const DEFAULT_FAUST2SC: &str = "faust2sc";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaustSettings {
    /// Compiler executable name or path.
    pub compiler: String,
    /// Architecture template base name; `<architecture>.cpp` is passed to `-a`.
    pub architecture: String,
    /// Extra compiler flags, placed before every other argument.
    pub flags: Vec<String>,
    /// Directories searched for imports and the architecture file.
    pub search_path: SearchPath,
    /// Binding generator executable name or path.
    pub faust2sc: String,
    /// `--prefix` for SuperCollider bindings.
    pub faust2sc_prefix: String,
    /// `--prefix` (module name) for Haskell bindings.
    pub haskell_module: String,
    /// How import tokens map onto search directories.
    pub resolve_policy: ResolvePolicy,
}

impl Default for FaustSettings {
    fn default() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            architecture: DEFAULT_ARCHITECTURE.to_string(),
            flags: Vec::new(),
            search_path: SearchPath::default(),
            faust2sc: DEFAULT_FAUST2SC.to_string(),
            faust2sc_prefix: String::new(),
            haskell_module: String::new(),
            resolve_policy: ResolvePolicy::default(),
        }
    }
}

impl FaustSettings {
    /// Load settings from a JSON file.
    ///
    /// Missing fields take their defaults. Relative search directories are
    /// resolved against the directory holding the file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self =
            serde_json::from_str(&content).map_err(|source| Error::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;

        let base = parent_dir(path);
        debug!(path = %path.display(), "loaded settings");
        Ok(settings.anchored(&base))
    }

    /// Settings for a project rooted somewhere above `cwd`.
    ///
    /// Uses the nearest `faustbuild.json`; without one, defaults anchored at
    /// `cwd`. Returns the file that was used, if any.
    pub fn discover(cwd: &Path) -> Result<(Self, Option<PathBuf>), Error> {
        match find_settings_file(cwd) {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default().anchored(cwd), None)),
        }
    }

    /// Resolve relative search directories against `base`.
    #[must_use]
    pub fn anchored(mut self, base: &Path) -> Self {
        self.search_path = self.search_path.anchored(base);
        self
    }

    /// File name of the architecture template, e.g. `module.cpp`.
    #[must_use]
    pub fn architecture_file(&self) -> String {
        architecture_file_name(&self.architecture)
    }

    #[must_use]
    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    #[must_use]
    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = architecture.into();
        self
    }

    /// Append compiler flags after any already configured.
    #[must_use]
    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_search_path(mut self, search_path: SearchPath) -> Self {
        self.search_path = search_path;
        self
    }

    /// Put `dirs` ahead of the configured search directories.
    #[must_use]
    pub fn with_search_dirs_first<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_path = self.search_path.with_prepended(dirs);
        self
    }

    #[must_use]
    pub fn with_faust2sc(mut self, faust2sc: impl Into<String>) -> Self {
        self.faust2sc = faust2sc.into();
        self
    }

    #[must_use]
    pub fn with_faust2sc_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.faust2sc_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_haskell_module(mut self, module: impl Into<String>) -> Self {
        self.haskell_module = module.into();
        self
    }

    #[must_use]
    pub fn with_resolve_policy(mut self, policy: ResolvePolicy) -> Self {
        self.resolve_policy = policy;
        self
    }
}

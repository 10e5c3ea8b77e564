//! `faustbuild deps`: the transitive import closure, optionally as a depfile.

use super::{absolutize, load_settings, print_json};
use crate::ToolchainArgs;
use faustbuild_core::scan::UnresolvedImport;
use faustbuild_core::version::SCHEMA_VERSION;
use faustbuild_core::{scan_closure, write_depfile, Config, RealFs, RuleKind};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize)]
struct DepsOutput {
    schema_version: u32,
    file: PathBuf,
    dependencies: Vec<PathBuf>,
    unresolved: Vec<UnresolvedImport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    depfile: Option<PathBuf>,
}

pub fn run(
    config: &Config,
    args: &ToolchainArgs,
    file: &Path,
    depfile: Option<&Path>,
    target: Option<&Path>,
) -> Result<()> {
    let settings = load_settings(config, args)?;
    let file = absolutize(&config.cwd, file);

    if !file.is_file() {
        return Err(miette::miette!("{} is not a file", file.display()));
    }

    let closure = scan_closure(
        &file,
        &settings.search_path,
        &RealFs,
        settings.resolve_policy,
    );

    let depfile = match depfile {
        Some(path) => {
            let path = absolutize(&config.cwd, path);
            let target = match target {
                Some(t) => t.to_path_buf(),
                None => RuleKind::Cpp.target_for(&file).into_diagnostic()?,
            };
            let written = write_depfile(&path, &target, &closure.files).into_diagnostic()?;
            info!(path = %path.display(), written, "depfile");
            Some(path)
        }
        None => None,
    };

    let output = DepsOutput {
        schema_version: SCHEMA_VERSION,
        file,
        dependencies: closure.files,
        unresolved: closure.unresolved,
        depfile,
    };

    if config.json_logs {
        return print_json(&output);
    }

    for dep in &output.dependencies {
        println!("{}", dep.display());
    }
    for miss in &output.unresolved {
        eprintln!(
            "warning: {}:{}: import \"{}\" not found",
            miss.document.display(),
            miss.token.line,
            miss.token.name
        );
    }
    Ok(())
}

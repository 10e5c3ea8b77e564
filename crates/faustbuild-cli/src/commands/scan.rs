//! `faustbuild scan`: one level of imports.

use super::{absolutize, load_settings, print_json};
use crate::ToolchainArgs;
use faustbuild_core::version::SCHEMA_VERSION;
use faustbuild_core::{
    scan_source, Config, ImportToken, RealFs, ResolvePolicy, ResolvedDependency, SourceDocument,
};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct ScanOutput {
    schema_version: u32,
    file: PathBuf,
    policy: ResolvePolicy,
    /// Effective search order: the file's directory, then the search path.
    search_dirs: Vec<PathBuf>,
    imports: Vec<ImportToken>,
    dependencies: Vec<ResolvedDependency>,
}

pub fn run(config: &Config, args: &ToolchainArgs, file: &Path) -> Result<()> {
    let settings = load_settings(config, args)?;
    let file = absolutize(&config.cwd, file);

    let document = SourceDocument::read(&file, &RealFs).into_diagnostic()?;
    let dependencies = scan_source(
        &document,
        &settings.search_path,
        &RealFs,
        settings.resolve_policy,
    );

    let output = ScanOutput {
        schema_version: SCHEMA_VERSION,
        search_dirs: settings.search_path.effective_for(&file),
        imports: document.imports(),
        file,
        policy: settings.resolve_policy,
        dependencies,
    };

    if config.json_logs {
        return print_json(&output);
    }

    for token in &output.imports {
        let hits: Vec<&ResolvedDependency> = output
            .dependencies
            .iter()
            .filter(|d| &d.token == token)
            .collect();
        if hits.is_empty() {
            println!("{}:{} \x1b[31mnot found\x1b[0m", token.line, token.name);
        }
        for hit in hits {
            println!("{}:{} -> {}", token.line, token.name, hit.path.display());
        }
    }
    Ok(())
}

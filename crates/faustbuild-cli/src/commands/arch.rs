//! `faustbuild arch`: where the architecture template comes from.

use super::{load_settings, print_json};
use crate::ToolchainArgs;
use faustbuild_core::{scan_architecture, Config, RealFs, SearchPath};
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct ArchOutput {
    architecture: String,
    file: String,
    search_path: SearchPath,
    matches: Vec<PathBuf>,
}

pub fn run(config: &Config, args: &ToolchainArgs) -> Result<()> {
    let settings = load_settings(config, args)?;
    let matches = scan_architecture(&settings.architecture, &settings.search_path, &RealFs);

    let output = ArchOutput {
        file: settings.architecture_file(),
        architecture: settings.architecture,
        search_path: settings.search_path,
        matches,
    };

    if config.json_logs {
        return print_json(&output);
    }

    if output.matches.is_empty() {
        return Err(miette::miette!(
            help = "add the directory holding it with -I or to search_path in faustbuild.json",
            "{} not found in search path",
            output.file
        ));
    }
    for path in &output.matches {
        println!("{}", path.display());
    }
    Ok(())
}

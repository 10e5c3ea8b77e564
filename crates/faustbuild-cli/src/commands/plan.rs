//! `faustbuild plan`: every target for a set of sources.

use super::{absolutize, load_settings, print_json};
use crate::ToolchainArgs;
use faustbuild_core::plan::PlanOptions;
use faustbuild_core::{plan_sources, Config, RealFs, RuleKind};
use faustbuild_util::walk::find_dsp_sources;
use miette::{IntoDiagnostic, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct PlanArgs {
    pub paths: Vec<PathBuf>,
    pub rules: Vec<RuleKind>,
    pub sc_target: Option<PathBuf>,
    pub hs_target: Option<PathBuf>,
}

pub fn run(config: &Config, args: &ToolchainArgs, plan_args: &PlanArgs) -> Result<()> {
    let settings = load_settings(config, args)?;
    let sources = collect_sources(&config.cwd, &plan_args.paths);
    debug!(count = sources.len(), "sources");

    let defaults = PlanOptions::default();
    let sc_target = absolutize(
        &config.cwd,
        plan_args.sc_target.as_deref().unwrap_or(&defaults.sc_target),
    );
    let hs_target = absolutize(
        &config.cwd,
        plan_args.hs_target.as_deref().unwrap_or(&defaults.hs_target),
    );
    let mut options = defaults.with_sc_target(sc_target).with_hs_target(hs_target);
    if !plan_args.rules.is_empty() {
        options = options.with_rules(plan_args.rules.iter().copied());
    }

    let plan = plan_sources(&sources, &config.cwd, &settings, &RealFs, &options).into_diagnostic()?;

    if config.json_logs {
        return print_json(&plan);
    }

    for id in plan.toposort() {
        let Some(node) = plan.get_node(id) else {
            continue;
        };
        println!("\x1b[1m{id}\x1b[0m");
        for input in &node.inputs {
            println!("  < {}", input.display());
        }
        for step in &node.steps {
            println!("  $ {}", step.display());
        }
    }
    for note in &plan.notes {
        eprintln!("note: [{}] {}", note.code, note.message);
    }
    Ok(())
}

/// Files are taken as given; directories contribute every `.dsp` below them.
/// A file reached twice is kept at its first position.
fn collect_sources(cwd: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    let roots: Vec<PathBuf> = if paths.is_empty() {
        vec![cwd.to_path_buf()]
    } else {
        paths.iter().map(|p| absolutize(cwd, p)).collect()
    };

    let mut seen = HashSet::new();
    let mut sources = Vec::new();
    for root in roots {
        let found = if root.is_dir() {
            find_dsp_sources(&root)
        } else {
            vec![root]
        };
        for source in found {
            if seen.insert(source.clone()) {
                sources.push(source);
            }
        }
    }
    sources
}

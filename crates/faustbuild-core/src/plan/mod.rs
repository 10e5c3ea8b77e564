//! Build plans.
//!
//! A plan lists every target a host should register for a set of `.dsp`
//! sources: which rule makes it, its explicit sources, the implicit inputs
//! found by scanning, the extra outputs it emits and the steps that produce
//! it. Binding targets (`.sc`, `.hs`) collect every XML description and
//! depend on the nodes that make them.

pub mod codes;
mod graph;

pub use graph::{BuildNode, BuildPlan, PlanNote, PLAN_SCHEMA_VERSION};

use crate::error::Error;
use crate::fs::SourceFs;
use crate::rules::{steps_for, RuleKind};
use crate::scan::{scan_architecture, scan_closure, ImportClosure};
use crate::settings::FaustSettings;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default SuperCollider target.
pub const DEFAULT_SC_TARGET: &str = "Faust.sc";

/// Default Haskell target.
pub const DEFAULT_HS_TARGET: &str = "Faust.hs";

/// What to plan for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    /// Rules to apply. XML nodes are added whenever a binding rule is asked for.
    pub rules: BTreeSet<RuleKind>,
    pub sc_target: PathBuf,
    pub hs_target: PathBuf,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            rules: BTreeSet::from([RuleKind::Cpp]),
            sc_target: PathBuf::from(DEFAULT_SC_TARGET),
            hs_target: PathBuf::from(DEFAULT_HS_TARGET),
        }
    }
}

impl PlanOptions {
    #[must_use]
    pub fn with_rules<I: IntoIterator<Item = RuleKind>>(mut self, rules: I) -> Self {
        self.rules = rules.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_sc_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.sc_target = target.into();
        self
    }

    #[must_use]
    pub fn with_hs_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.hs_target = target.into();
        self
    }

    /// Rules that produce one node per source, in plan order.
    fn per_source_rules(&self) -> Vec<RuleKind> {
        let wants_bindings = self.rules.iter().any(RuleKind::is_multi_source);
        RuleKind::ALL
            .into_iter()
            .filter(|r| !r.is_multi_source())
            .filter(|r| self.rules.contains(r) || (*r == RuleKind::Xml && wants_bindings))
            .collect()
    }
}

/// Plan every requested target for `sources`.
///
/// Sources are scanned in parallel; each scan reads its files afresh. A source
/// listed more than once is planned once, at its first position.
pub fn plan_sources(
    sources: &[PathBuf],
    cwd: &Path,
    settings: &FaustSettings,
    fs: &dyn SourceFs,
    options: &PlanOptions,
) -> Result<BuildPlan, Error> {
    let sources = unique_sources(sources);
    let per_source = options.per_source_rules();
    for source in &sources {
        for rule in &per_source {
            rule.check_source(source)?;
        }
    }

    let closures: Vec<ImportClosure> = sources
        .par_iter()
        .map(|source| {
            scan_closure(
                source,
                &settings.search_path,
                fs,
                settings.resolve_policy,
            )
        })
        .collect();

    let mut plan = BuildPlan::new(cwd);

    let architecture = if per_source.contains(&RuleKind::Cpp) {
        let found = scan_architecture(&settings.architecture, &settings.search_path, fs);
        if found.is_empty() {
            plan.add_note(PlanNote::new(
                codes::PLAN_ARCHITECTURE_NOT_FOUND,
                format!(
                    "architecture file {} not found in search path",
                    settings.architecture_file()
                ),
            ));
        }
        found
    } else {
        Vec::new()
    };

    let mut xml_nodes: Vec<(String, PathBuf)> = Vec::new();

    for (source, closure) in sources.iter().zip(&closures) {
        if !fs.exists(source) {
            plan.add_note(PlanNote::new(
                codes::PLAN_SOURCE_NOT_FOUND,
                format!("source {} does not exist", source.display()),
            ));
        }
        for unresolved in &closure.unresolved {
            plan.add_note(PlanNote::new(
                codes::PLAN_IMPORT_UNRESOLVED,
                format!(
                    "{}:{}: import \"{}\" not found",
                    unresolved.document.display(),
                    unresolved.token.line,
                    unresolved.token.name
                ),
            ));
        }

        for &rule in &per_source {
            let target = rule.target_for(source)?;
            let steps = steps_for(rule, settings, std::slice::from_ref(source), &target)?;
            let mut node = BuildNode::new(rule, vec![source.clone()], target.clone(), steps);
            if rule.scans_imports() {
                for dep in &closure.files {
                    node.add_input(dep.clone());
                }
            }
            if rule == RuleKind::Cpp {
                for arch in &architecture {
                    node.add_input(arch.clone());
                }
            }
            if rule == RuleKind::Xml {
                xml_nodes.push((node.id.clone(), target));
            }
            plan.add_node(node);
        }
    }

    for rule in options.rules.iter().filter(|r| r.is_multi_source()) {
        let target = match rule {
            RuleKind::Haskell => &options.hs_target,
            _ => &options.sc_target,
        };
        let xml_sources: Vec<PathBuf> = xml_nodes.iter().map(|(_, t)| t.clone()).collect();
        let steps = steps_for(*rule, settings, &xml_sources, target)?;
        let mut node = BuildNode::new(*rule, xml_sources, target.clone(), steps);
        for (id, _) in &xml_nodes {
            node.add_dep(id.clone());
        }
        plan.add_node(node);
    }

    plan.normalize();
    debug!(notes = plan.notes.len(), "plan notes");
    info!(sources = sources.len(), nodes = plan.nodes.len(), "planned");
    Ok(plan)
}

fn unique_sources(sources: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    sources
        .iter()
        .filter(|&s| seen.insert(s.as_path()))
        .cloned()
        .collect()
}

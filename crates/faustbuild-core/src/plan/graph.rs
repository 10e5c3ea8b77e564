//! Plan types: nodes, notes and their ordering.
//!
//! ## Schema Version
//!
//! - Schema version 1: initial plan format

use crate::rules::{RuleKind, Step};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Schema version for the `BuildPlan` format.
pub const PLAN_SCHEMA_VERSION: u32 = 1;

/// One target and how to make it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildNode {
    /// Stable identifier, `<rule>:<target>`.
    pub id: String,
    pub rule: RuleKind,
    /// Explicit sources, in command-line order.
    pub sources: Vec<PathBuf>,
    pub target: PathBuf,
    /// Everything written, the target included (sorted).
    pub outputs: Vec<PathBuf>,
    /// Implicit inputs found by scanning (sorted, unique).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<PathBuf>,
    /// Node IDs this depends on (sorted).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<String>,
    /// Recipe, run in order.
    pub steps: Vec<Step>,
}

impl BuildNode {
    /// Identifier for the node building `target` under `rule`.
    #[must_use]
    pub fn id_for(rule: RuleKind, target: &Path) -> String {
        format!("{rule}:{}", target.display())
    }

    #[must_use]
    pub fn new(rule: RuleKind, sources: Vec<PathBuf>, target: PathBuf, steps: Vec<Step>) -> Self {
        Self {
            id: Self::id_for(rule, &target),
            rule,
            outputs: rule.outputs(&target),
            sources,
            target,
            inputs: Vec::new(),
            deps: Vec::new(),
            steps,
        }
    }

    /// Add an implicit input.
    pub fn add_input(&mut self, path: impl Into<PathBuf>) {
        self.inputs.push(path.into());
    }

    /// Add a dependency on another node.
    pub fn add_dep(&mut self, id: impl Into<String>) {
        self.deps.push(id.into());
    }

    /// Sort inputs, outputs and deps for deterministic ordering.
    pub fn normalize(&mut self) {
        self.inputs.sort();
        self.inputs.dedup();
        self.outputs.sort();
        self.deps.sort();
        self.deps.dedup();
    }
}

/// Something the planner noticed but could not act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanNote {
    /// Stable code from [`codes`](super::codes).
    pub code: String,
    pub message: String,
}

impl PlanNote {
    #[must_use]
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Every node a host needs to register, plus notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub schema_version: u32,
    /// Working directory relative paths are interpreted against.
    pub cwd: PathBuf,
    /// Nodes, sorted by id.
    pub nodes: Vec<BuildNode>,
    /// Always present, may be empty.
    #[serde(default)]
    pub notes: Vec<PlanNote>,
}

impl BuildPlan {
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            schema_version: PLAN_SCHEMA_VERSION,
            cwd: cwd.into(),
            nodes: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn add_node(&mut self, mut node: BuildNode) {
        node.normalize();
        self.nodes.push(node);
    }

    pub fn add_note(&mut self, note: PlanNote) {
        self.notes.push(note);
    }

    /// Sort nodes by id.
    pub fn normalize(&mut self) {
        self.nodes.sort_by(|a, b| a.id.cmp(&b.id));
    }

    #[must_use]
    pub fn get_node(&self, id: &str) -> Option<&BuildNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Node IDs in execution order (dependencies first).
    ///
    /// Ties are broken by id, so the order is stable across runs. Nodes caught
    /// in a cycle are left out.
    #[must_use]
    pub fn toposort(&self) -> Vec<&str> {
        let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
        let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for node in &self.nodes {
            in_degree.entry(node.id.as_str()).or_insert(0);
            for dep in &node.deps {
                *in_degree.entry(node.id.as_str()).or_insert(0) += 1;
                dependents
                    .entry(dep.as_str())
                    .or_default()
                    .push(node.id.as_str());
            }
        }

        // Kahn's algorithm; `ready` is kept sorted descending so pop() yields
        // the smallest id.
        let mut result = Vec::new();
        let mut ready: Vec<&str> = in_degree
            .iter()
            .filter(|(_, &deg)| deg == 0)
            .map(|(&id, _)| id)
            .collect();
        ready.sort_by(|a, b| b.cmp(a));

        while let Some(id) = ready.pop() {
            result.push(id);
            if let Some(next) = dependents.get(id) {
                for &dep_id in next {
                    if let Some(deg) = in_degree.get_mut(dep_id) {
                        *deg -= 1;
                        if *deg == 0 {
                            let pos = ready
                                .binary_search_by(|other| dep_id.cmp(other))
                                .unwrap_or_else(|e| e);
                            ready.insert(pos, dep_id);
                        }
                    }
                }
            }
        }

        result
    }
}

impl Default for BuildPlan {
    fn default() -> Self {
        Self::new("")
    }
}

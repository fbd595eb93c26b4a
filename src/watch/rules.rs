// src/watch/rules.rs

use std::fmt;

use anyhow::{Context, Result, anyhow};
use globset::GlobSet;

use crate::pipeline::source::build_globset;
use crate::tasks::TaskName;

/// What happens when a watch rule matches a changed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchAction {
    /// Re-run the named task; optionally signal connected preview clients
    /// after a successful run.
    Run { task: TaskName, reload: bool },
    /// Signal connected preview clients without running anything.
    Reload,
}

impl WatchAction {
    pub fn run(task: impl Into<TaskName>, reload: bool) -> Self {
        WatchAction::Run {
            task: task.into(),
            reload,
        }
    }
}

/// A binding from glob patterns (relative to the watch root) to an action.
#[derive(Debug, Clone)]
pub struct WatchRule {
    pub patterns: Vec<String>,
    pub action: WatchAction,
}

impl WatchRule {
    pub fn new(patterns: &[&str], action: WatchAction) -> Self {
        Self {
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            action,
        }
    }
}

/// A named long-running entry: optional preview server, tasks to run before
/// watching starts, and the rules to watch with.
#[derive(Debug, Clone)]
pub struct WatchPlan {
    pub name: String,
    pub serve: bool,
    pub init_tasks: Vec<TaskName>,
    pub rules: Vec<WatchRule>,
}

/// Watch rules with their patterns compiled to glob sets.
#[derive(Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

#[derive(Clone)]
struct CompiledRule {
    action: WatchAction,
    set: GlobSet,
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}

impl RuleSet {
    pub fn compile(rules: &[WatchRule]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let set = build_globset(&rule.patterns)
                .with_context(|| format!("building watch globset for {:?}", rule.action))?
                .ok_or_else(|| anyhow!("watch rule for {:?} has no patterns", rule.action))?;
            compiled.push(CompiledRule {
                action: rule.action.clone(),
                set,
            });
        }
        Ok(Self { rules: compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Actions whose patterns match the given path (relative to the watch
    /// root, forward slashes), in rule order.
    pub fn actions_for(&self, rel_path: &str) -> Vec<WatchAction> {
        self.rules
            .iter()
            .filter(|rule| rule.set.is_match(rel_path))
            .map(|rule| rule.action.clone())
            .collect()
    }
}

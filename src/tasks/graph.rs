// src/tasks/graph.rs

use std::collections::BTreeMap;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::PathConfig;
use crate::errors::{GraphError, TaskError};
use crate::pipeline::{Pipeline, SourceSpec};

/// Public type alias for task names.
pub type TaskName = String;

/// A named unit of pipeline execution with its ordered prerequisites.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub name: TaskName,
    pub prerequisites: Vec<TaskName>,
    pub pipelines: Vec<Pipeline>,
}

/// An explicit task-graph value: built by the caller, passed where needed.
///
/// Never a process-wide registry, so multiple graphs can coexist (tests
/// construct throwaway graphs freely). Acyclicity, prerequisite references,
/// group references and glob syntax are all checked when the value is built;
/// a graph that exists is safe to resolve.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: BTreeMap<TaskName, TaskSpec>,
}

impl TaskGraph {
    pub fn builder() -> TaskGraphBuilder {
        TaskGraphBuilder { tasks: Vec::new() }
    }

    pub fn get(&self, name: &str) -> Option<&TaskSpec> {
        self.tasks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Registered task names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(|s| s.as_str())
    }

    /// Depth-first resolution: for a task with prerequisites [P1..Pn], each
    /// Pi resolves (recursively) before the task itself, in listed order.
    ///
    /// There is no memoization — a shared prerequisite appears once per
    /// invocation path that reaches it. Termination is guaranteed by the
    /// acyclicity check at build time.
    pub fn resolution_order(&self, task: &str) -> Result<Vec<TaskName>, TaskError> {
        let mut order = Vec::new();
        self.resolve_into(task, &mut order)?;
        Ok(order)
    }

    fn resolve_into(&self, name: &str, order: &mut Vec<TaskName>) -> Result<(), TaskError> {
        let spec = self
            .get(name)
            .ok_or_else(|| TaskError::UnknownTask(name.to_string()))?;
        for prerequisite in &spec.prerequisites {
            self.resolve_into(prerequisite, order)?;
        }
        order.push(spec.name.clone());
        Ok(())
    }
}

/// Builder collecting task definitions before validation.
#[derive(Debug, Default)]
pub struct TaskGraphBuilder {
    tasks: Vec<TaskSpec>,
}

impl TaskGraphBuilder {
    pub fn task(
        mut self,
        name: impl Into<TaskName>,
        prerequisites: &[&str],
        pipelines: Vec<Pipeline>,
    ) -> Self {
        self.tasks.push(TaskSpec {
            name: name.into(),
            prerequisites: prerequisites.iter().map(|s| s.to_string()).collect(),
            pipelines,
        });
        self
    }

    /// Validate and freeze the graph.
    ///
    /// Checks, in order: duplicate names, self-dependencies, unknown
    /// prerequisite references, cycles, and pipeline sources (undeclared
    /// group references against `paths`, glob syntax).
    pub fn build(self, paths: &PathConfig) -> Result<TaskGraph, GraphError> {
        let mut tasks: BTreeMap<TaskName, TaskSpec> = BTreeMap::new();
        for spec in self.tasks {
            if tasks.contains_key(&spec.name) {
                return Err(GraphError::DuplicateTask(spec.name));
            }
            tasks.insert(spec.name.clone(), spec);
        }

        for (name, spec) in tasks.iter() {
            for prerequisite in spec.prerequisites.iter() {
                if prerequisite == name {
                    return Err(GraphError::SelfDependency { task: name.clone() });
                }
                if !tasks.contains_key(prerequisite) {
                    return Err(GraphError::UnknownPrerequisite {
                        task: name.clone(),
                        prerequisite: prerequisite.clone(),
                    });
                }
            }
        }

        validate_dag(&tasks)?;
        validate_pipelines(&tasks, paths)?;

        Ok(TaskGraph { tasks })
    }
}

/// Reject cyclic graphs via topological sort.
///
/// Edge direction: prerequisite -> dependent.
fn validate_dag(tasks: &BTreeMap<TaskName, TaskSpec>) -> Result<(), GraphError> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in tasks.keys() {
        graph.add_node(name.as_str());
    }

    for (name, spec) in tasks.iter() {
        for prerequisite in spec.prerequisites.iter() {
            graph.add_edge(prerequisite.as_str(), name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(GraphError::Cycle(cycle.node_id().to_string())),
    }
}

/// Reject pipelines whose source cannot be resolved: a reference to a file
/// group the configuration does not declare, or a glob that does not
/// compile.
fn validate_pipelines(
    tasks: &BTreeMap<TaskName, TaskSpec>,
    paths: &PathConfig,
) -> Result<(), GraphError> {
    for (name, spec) in tasks.iter() {
        for pipeline in spec.pipelines.iter() {
            let Pipeline::Transform(transform) = pipeline else {
                continue;
            };

            let group = match &transform.source.spec {
                SourceSpec::Group(group_name) => {
                    paths
                        .groups
                        .get(group_name)
                        .ok_or_else(|| GraphError::UnknownGroup {
                            task: name.clone(),
                            group: group_name.clone(),
                        })?
                }
                SourceSpec::Patterns(patterns) => patterns,
            };

            for pattern in group.include.iter().chain(group.exclude.iter()) {
                if let Err(err) = globset::Glob::new(pattern) {
                    return Err(GraphError::BadPattern {
                        task: name.clone(),
                        pattern: pattern.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

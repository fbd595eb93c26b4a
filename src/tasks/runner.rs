// src/tasks/runner.rs

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::model::PathConfig;
use crate::errors::TaskError;
use crate::pipeline;
use crate::tasks::graph::{TaskGraph, TaskName};

/// Executes tasks from a [`TaskGraph`] against a project root.
///
/// Re-running a task re-executes its full pipeline; nothing is memoized and
/// nothing is skipped. Prerequisite execution is the only mechanism that
/// establishes file-existence ordering between tasks.
pub struct Runner<'g> {
    graph: &'g TaskGraph,
    root: PathBuf,
    paths: PathConfig,
}

/// Call log and counters from one `run` invocation.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Tasks in the order their pipelines executed.
    pub executed: Vec<TaskName>,
    pub files_written: usize,
    pub files_failed: usize,
}

impl<'g> Runner<'g> {
    pub fn new(graph: &'g TaskGraph, root: impl Into<PathBuf>, paths: PathConfig) -> Self {
        Self {
            graph,
            root: root.into(),
            paths,
        }
    }

    pub fn graph(&self) -> &TaskGraph {
        self.graph
    }

    /// Resolve the prerequisite chain of `task` and execute every resolved
    /// task once, in order.
    ///
    /// The first pipeline failure aborts the run: a prerequisite error
    /// propagates before the dependent's pipelines get a chance to execute.
    pub fn run(&self, task: &str) -> Result<RunReport, TaskError> {
        let order = self.graph.resolution_order(task)?;
        debug!(task = %task, ?order, "resolved task order");

        let mut report = RunReport::default();
        for name in order {
            self.run_single(&name, &mut report)?;
        }
        Ok(report)
    }

    fn run_single(&self, name: &str, report: &mut RunReport) -> Result<(), TaskError> {
        let spec = self
            .graph
            .get(name)
            .ok_or_else(|| TaskError::UnknownTask(name.to_string()))?;

        info!(task = %name, "running task");
        for pipeline in spec.pipelines.iter() {
            let stats =
                pipeline::execute(pipeline, &self.root, &self.paths).map_err(|cause| {
                    TaskError::Failed {
                        task: name.to_string(),
                        cause,
                    }
                })?;
            report.files_written += stats.written;
            report.files_failed += stats.failed;
        }

        report.executed.push(name.to_string());
        Ok(())
    }
}

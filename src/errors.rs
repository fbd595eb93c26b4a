// src/errors.rs

//! Structured error types for graph construction and task execution.
//!
//! Application-level fall-through (config loading, pipeline internals) uses
//! `anyhow` with context; the enums here cover the errors callers match on.

use thiserror::Error;

/// Errors raised while building a [`TaskGraph`](crate::tasks::TaskGraph).
///
/// All of these are definition-time errors: a graph that would loop, or that
/// references something undeclared, is rejected before anything runs.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("duplicate task name '{0}'")]
    DuplicateTask(String),

    #[error("task '{task}' lists unknown prerequisite '{prerequisite}'")]
    UnknownPrerequisite { task: String, prerequisite: String },

    #[error("task '{task}' cannot depend on itself")]
    SelfDependency { task: String },

    #[error("cycle detected in task graph involving task '{0}'")]
    Cycle(String),

    #[error("task '{task}' references undeclared file group '{group}'")]
    UnknownGroup { task: String, group: String },

    #[error("task '{task}' has invalid glob pattern '{pattern}': {message}")]
    BadPattern {
        task: String,
        pattern: String,
        message: String,
    },
}

/// Errors raised while running a task.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("unknown task '{0}'")]
    UnknownTask(String),

    /// A pipeline of this task (or of one of its prerequisites) failed.
    #[error("task '{task}' failed: {cause}")]
    Failed { task: String, cause: anyhow::Error },
}

impl TaskError {
    /// Name of the task the error is attributed to.
    pub fn task(&self) -> &str {
        match self {
            TaskError::UnknownTask(name) => name,
            TaskError::Failed { task, .. } => task,
        }
    }
}

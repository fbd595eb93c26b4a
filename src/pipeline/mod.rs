// src/pipeline/mod.rs

//! File-stream pipelines.
//!
//! A pipeline reads the files matched by a glob selection, folds them through
//! an ordered sequence of content transforms, and writes the survivors to a
//! destination directory. Stages are pure functions over the in-memory file
//! stream: order-preserving, with per-file failure isolation (`exec.rs`).

pub mod exec;
pub mod source;
pub mod step;

use std::path::PathBuf;

pub use exec::execute;
pub use source::{FileSelection, SourceSpec};
pub use step::TransformStep;

/// One file in flight through a pipeline.
#[derive(Debug, Clone)]
pub struct FileData {
    /// Path relative to the pipeline's base directory. Steps may rewrite this
    /// (extension changes, prefix/suffix renames).
    pub rel_path: PathBuf,

    /// Absolute path the contents were read from. Kept for diagnostics and
    /// for resolving `@import`s next to the source file.
    pub origin: PathBuf,

    pub contents: Vec<u8>,
}

/// A named unit of pipeline work.
///
/// The cleaner collaborator operates on a directory rather than a file
/// stream, so it gets its own variant instead of a [`TransformStep`].
#[derive(Debug, Clone)]
pub enum Pipeline {
    Transform(TransformPipeline),
    Clean { dir: PathBuf },
}

/// Read matching files, apply steps in order, write to `dest`.
#[derive(Debug, Clone)]
pub struct TransformPipeline {
    pub source: FileSelection,

    /// Leading path component stripped from each relative path before the
    /// destination path is formed (e.g. `scss/site.scss` → `site.scss`).
    pub strip_prefix: Option<PathBuf>,

    pub steps: Vec<TransformStep>,

    /// Destination directory, relative to the project root.
    pub dest: PathBuf,
}

impl Pipeline {
    pub fn transform(
        source: FileSelection,
        strip_prefix: Option<&str>,
        steps: Vec<TransformStep>,
        dest: impl Into<PathBuf>,
    ) -> Self {
        Pipeline::Transform(TransformPipeline {
            source,
            strip_prefix: strip_prefix.map(PathBuf::from),
            steps,
            dest: dest.into(),
        })
    }
}

/// Counters reported by one pipeline execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineStats {
    /// Files matched by the source selection.
    pub matched: usize,
    /// Files written to the destination.
    pub written: usize,
    /// Writes skipped because the destination already held identical bytes.
    pub skipped: usize,
    /// Files dropped by a failing transform step.
    pub failed: usize,
}

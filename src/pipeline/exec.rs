// src/pipeline/exec.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::config::model::PathConfig;
use crate::pipeline::source::{enumerate, rel_str};
use crate::pipeline::{FileData, Pipeline, PipelineStats, TransformPipeline, TransformStep};
use crate::transforms;

/// Execute one pipeline against the project root.
///
/// Matching zero files is a successful no-op. A failing transform step drops
/// that file and is logged; read/write I/O failures are fatal for the
/// invocation.
pub fn execute(pipeline: &Pipeline, root: &Path, paths: &PathConfig) -> Result<PipelineStats> {
    match pipeline {
        Pipeline::Clean { dir } => clean_dir(&root.join(dir)),
        Pipeline::Transform(transform) => run_transform(transform, root, paths),
    }
}

/// Remove a directory tree. An absent directory is a no-op, not an error.
fn clean_dir(dir: &Path) -> Result<PipelineStats> {
    if !dir.exists() {
        debug!(?dir, "clean target absent; nothing to do");
        return Ok(PipelineStats::default());
    }
    fs::remove_dir_all(dir).with_context(|| format!("removing directory {:?}", dir))?;
    info!(?dir, "removed directory");
    Ok(PipelineStats::default())
}

fn run_transform(
    pipeline: &TransformPipeline,
    root: &Path,
    paths: &PathConfig,
) -> Result<PipelineStats> {
    let mut stats = PipelineStats::default();

    let group = pipeline.source.resolve(paths)?;
    let base = root.join(&pipeline.source.base);
    let rels = enumerate(&base, &group)?;

    if rels.is_empty() {
        debug!(base = ?base, "no files matched; pipeline is a no-op");
        return Ok(stats);
    }
    stats.matched = rels.len();

    let mut stream: Vec<FileData> = Vec::with_capacity(rels.len());
    for rel in rels {
        let origin = base.join(&rel);
        let contents =
            fs::read(&origin).with_context(|| format!("reading source file {:?}", origin))?;
        stream.push(FileData {
            rel_path: rel,
            origin,
            contents,
        });
    }

    for step in &pipeline.steps {
        stream = apply_step(step, stream, &mut stats);
    }

    let dest_dir = root.join(&pipeline.dest);
    for file in stream {
        let rel = strip(&file.rel_path, pipeline.strip_prefix.as_deref());
        let dest = dest_dir.join(rel);
        if write_output(&dest, &file.contents)? {
            stats.written += 1;
        } else {
            stats.skipped += 1;
        }
    }

    debug!(
        matched = stats.matched,
        written = stats.written,
        skipped = stats.skipped,
        failed = stats.failed,
        dest = ?dest_dir,
        "pipeline finished"
    );
    Ok(stats)
}

/// Apply one step to every file in the stream, in order.
///
/// A file the step rejects is logged and dropped; the rest of the stream
/// continues.
fn apply_step(
    step: &TransformStep,
    input: Vec<FileData>,
    stats: &mut PipelineStats,
) -> Vec<FileData> {
    let mut output = Vec::with_capacity(input.len());
    for file in input {
        let origin = file.origin.clone();
        match transforms::apply(step, file) {
            Ok(transformed) => output.push(transformed),
            Err(err) => {
                error!(file = %origin.display(), error = %err, "transform failed; skipping file");
                stats.failed += 1;
            }
        }
    }
    output
}

fn strip(rel: &Path, prefix: Option<&Path>) -> PathBuf {
    match prefix {
        Some(prefix) => rel.strip_prefix(prefix).unwrap_or(rel).to_path_buf(),
        None => rel.to_path_buf(),
    }
}

/// Write `contents` to `dest`, creating parent directories as needed.
///
/// Returns `false` (and writes nothing) when the destination already holds
/// byte-identical content, so watch mode does not feed on its own output.
fn write_output(dest: &Path, contents: &[u8]) -> Result<bool> {
    if let Ok(existing) = fs::read(dest) {
        if blake3::hash(&existing) == blake3::hash(contents) {
            debug!(path = %rel_str(dest), "destination unchanged; skipping write");
            return Ok(false);
        }
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {:?}", parent))?;
    }
    fs::write(dest, contents).with_context(|| format!("writing output file {:?}", dest))?;
    Ok(true)
}

// src/pipeline/source.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::model::{FileGroup, PathConfig};

/// Where a pipeline's input files come from.
#[derive(Debug, Clone)]
pub enum SourceSpec {
    /// A named group declared in `[paths.groups]`.
    Group(String),
    /// Inline include/exclude patterns.
    Patterns(FileGroup),
}

/// A source spec anchored to a base directory (relative to the project root).
#[derive(Debug, Clone)]
pub struct FileSelection {
    pub base: PathBuf,
    pub spec: SourceSpec,
}

impl FileSelection {
    pub fn group(base: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            spec: SourceSpec::Group(name.into()),
        }
    }

    pub fn patterns(base: impl Into<PathBuf>, include: &[&str], exclude: &[&str]) -> Self {
        Self {
            base: base.into(),
            spec: SourceSpec::Patterns(FileGroup::new(include, exclude)),
        }
    }

    /// Resolve a group reference against the path configuration.
    ///
    /// Group existence is checked when the task graph is built, so a miss
    /// here means the graph and config went out of sync.
    pub fn resolve(&self, paths: &PathConfig) -> Result<FileGroup> {
        match &self.spec {
            SourceSpec::Patterns(group) => Ok(group.clone()),
            SourceSpec::Group(name) => paths
                .groups
                .get(name)
                .cloned()
                .ok_or_else(|| anyhow!("file group '{name}' is not declared in [paths.groups]")),
        }
    }
}

/// Enumerate the files a group selects under `base`, as sorted paths relative
/// to `base`.
///
/// Includes are expanded on disk with the `glob` crate; excludes are applied
/// as a `globset` over the relative path. Directories matched by a pattern
/// (e.g. `css/vendor/**`) are skipped; only regular files flow into a
/// pipeline.
pub fn enumerate(base: &Path, group: &FileGroup) -> Result<Vec<PathBuf>> {
    let exclude = build_globset(&group.exclude)
        .with_context(|| format!("building exclude globset for {:?}", base))?;

    let mut rels: Vec<PathBuf> = Vec::new();

    for pattern in &group.include {
        let full = base.join(pattern);
        let full = full.to_string_lossy();

        let entries =
            glob::glob(&full).with_context(|| format!("invalid glob pattern '{pattern}'"))?;

        for entry in entries {
            let path = entry.with_context(|| format!("reading glob entry for '{pattern}'"))?;
            if !path.is_file() {
                continue;
            }
            let rel = path
                .strip_prefix(base)
                .with_context(|| format!("relativizing {:?} against {:?}", path, base))?;

            if let Some(exclude) = &exclude {
                if exclude.is_match(rel_str(rel)) {
                    continue;
                }
            }
            rels.push(rel.to_path_buf());
        }
    }

    rels.sort();
    rels.dedup();
    Ok(rels)
}

/// Build a GlobSet from simple string patterns; `None` when empty.
pub fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(Some(builder.build()?))
}

/// Path as a forward-slash string for glob matching.
pub fn rel_str(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

// src/config/validate.rs

use anyhow::{Context, Result, anyhow};
use globset::Glob;

use crate::config::model::ConfigFile;
use crate::transforms::styles::parse_compat;

/// Run semantic validation against a loaded configuration.
///
/// This checks:
/// - the dist root is distinct from the source root and not an ancestor of it
///   (the clean task removes the dist tree wholesale)
/// - every group glob pattern compiles
/// - the CSS compat token is recognised
///
/// It does **not** check that the directories exist; a glob matching nothing
/// is a valid no-op.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_roots(cfg)?;
    validate_groups(cfg)?;
    validate_compat(cfg)?;
    Ok(())
}

fn validate_roots(cfg: &ConfigFile) -> Result<()> {
    if cfg.paths.dist == cfg.paths.source {
        return Err(anyhow!(
            "[paths].dist must differ from [paths].source (both are {:?})",
            cfg.paths.dist
        ));
    }
    if cfg.paths.source.starts_with(&cfg.paths.dist) {
        return Err(anyhow!(
            "[paths].source {:?} lies inside [paths].dist {:?}; the clean task would delete it",
            cfg.paths.source,
            cfg.paths.dist
        ));
    }
    Ok(())
}

fn validate_groups(cfg: &ConfigFile) -> Result<()> {
    for (name, group) in cfg.paths.groups.iter() {
        for pattern in group.include.iter().chain(group.exclude.iter()) {
            Glob::new(pattern)
                .with_context(|| format!("invalid glob pattern '{pattern}' in group '{name}'"))?;
        }
    }
    Ok(())
}

fn validate_compat(cfg: &ConfigFile) -> Result<()> {
    parse_compat(&cfg.output.css_compat)
        .context("invalid [output].css_compat")
        .map(|_| ())
}

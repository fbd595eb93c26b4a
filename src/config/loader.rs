// src/config/loader.rs

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;

/// Load a configuration file from a given path and return the raw `ConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (glob syntax, path sanity, etc.). Use [`load_and_validate`] for
/// that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading config file at {:?}", path))?;

    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML config from {:?}", path))?;

    Ok(config)
}

/// Load a configuration file if it exists, else fall back to the defaults.
///
/// A missing file is not an error: the built-in task registry works against
/// the conventional `src`/`dist` layout. A file that exists but cannot be
/// read or parsed is still fatal.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(?path, "no config file; using built-in defaults");
        return Ok(ConfigFile::default());
    }
    load_from_path(path)
}

/// Load a configuration (or the defaults) and run semantic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML (defaults when the file is absent).
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - source/dist directory overlap,
///   - glob patterns that do not compile,
///   - an unknown CSS compat token.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_or_default(&path)?;
    validate_config(&config)?;
    Ok(config)
}

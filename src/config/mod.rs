// src/config/mod.rs

//! Configuration loading and validation for siteforge.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, or fall back to defaults (`loader.rs`).
//! - Validate path sanity, glob syntax and compat tokens (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{BannerConfig, ConfigFile, FileGroup, OutputConfig, PathConfig, ServeConfig};
pub use validate::validate_config;

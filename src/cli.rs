// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `siteforge`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "siteforge",
    version,
    about = "Build, watch and preview a static site.",
    long_about = None
)]
pub struct CliArgs {
    /// Task to run: a pipeline task (`clean`, `copy`, `scripts`, `sass`,
    /// `autoprefixme`, `minify-css`, `minify-js`, `default`) or a watch plan
    /// (`serve`, `browser-sync`, `watch-all`, `sass:watch`).
    #[arg(value_name = "TASK", default_value = "default")]
    pub task: String,

    /// Path to the config file (TOML).
    ///
    /// Built-in defaults are used when the file does not exist.
    #[arg(long, value_name = "PATH", default_value = "siteforge.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SITEFORGE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// List registered tasks and exit.
    #[arg(long)]
    pub list: bool,

    /// Print the resolved task order and pipelines, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

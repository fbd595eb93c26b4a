// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod serve;
pub mod tasks;
pub mod transforms;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::serve::ReloadHub;
use crate::tasks::{Runner, TaskGraph, build_graph, build_watch_plans};
use crate::watch::{Controller, ControllerEvent, RuleSet, WatchPlan};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the built-in task graph and watch plans
/// - one-shot task execution, or
/// - the watch controller + preview server + file watcher
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let root = project_root(&config_path);
    let graph = build_graph(&cfg)?;
    let plans = build_watch_plans(&cfg);

    if args.list {
        print_task_list(&graph, &plans);
        return Ok(());
    }

    if args.dry_run {
        print_dry_run(&graph, &plans, &args.task)?;
        return Ok(());
    }

    if let Some(plan) = plans.iter().find(|plan| plan.name == args.task) {
        return run_watch_plan(plan, &cfg, &graph, &root).await;
    }

    let runner = Runner::new(&graph, root, cfg.paths.clone());
    let report = runner.run(&args.task)?;
    info!(
        executed = ?report.executed,
        written = report.files_written,
        failed = report.files_failed,
        "build finished"
    );
    Ok(())
}

/// Run one watch plan until the process is interrupted.
async fn run_watch_plan(
    plan: &WatchPlan,
    cfg: &ConfigFile,
    graph: &TaskGraph,
    root: &Path,
) -> Result<()> {
    let runner = Runner::new(graph, root, cfg.paths.clone());

    // A failing initial build is fatal; failures after that (while watching)
    // are logged and the loop keeps going.
    for task in &plan.init_tasks {
        let report = runner.run(task)?;
        info!(task = %task, executed = ?report.executed, "initial build finished");
    }

    let reload = ReloadHub::new();
    let _server = if plan.serve {
        Some(serve::spawn_server(
            root.join(&cfg.paths.source),
            &cfg.serve,
            reload.clone(),
        )?)
    } else {
        None
    };

    let (events_tx, events_rx) = mpsc::channel::<ControllerEvent>(64);

    let rules = RuleSet::compile(&plan.rules)?;
    let _watcher = if rules.is_empty() {
        None
    } else {
        Some(watch::spawn_watcher(
            root.join(&cfg.paths.source),
            rules,
            events_tx.clone(),
        )?)
    };

    // Ctrl-C → graceful shutdown.
    {
        let tx = events_tx.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {err}");
                return;
            }
            let _ = tx.send(ControllerEvent::ShutdownRequested).await;
        });
    }

    let controller = Controller::new(runner, plan.serve.then(|| reload.clone()), events_rx);
    controller.run().await
}

/// Project root for resolving all relative paths: the directory containing
/// the config file, or `.`.
fn project_root(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn print_task_list(graph: &TaskGraph, plans: &[WatchPlan]) {
    println!("pipeline tasks:");
    for name in graph.names() {
        match graph.get(name) {
            Some(spec) if !spec.prerequisites.is_empty() => {
                println!("  {name}  (after: {})", spec.prerequisites.join(", "));
            }
            _ => println!("  {name}"),
        }
    }

    println!("watch plans:");
    for plan in plans {
        println!("  {}", plan.name);
    }
}

/// Dry-run output: the resolved execution order and each task's pipelines.
fn print_dry_run(graph: &TaskGraph, plans: &[WatchPlan], task: &str) -> Result<()> {
    if let Some(plan) = plans.iter().find(|plan| plan.name == task) {
        println!("watch plan '{}':", plan.name);
        println!("  serve: {}", plan.serve);
        if !plan.init_tasks.is_empty() {
            println!("  initial tasks: {}", plan.init_tasks.join(", "));
        }
        for rule in &plan.rules {
            println!("  on {:?} -> {:?}", rule.patterns, rule.action);
        }
        return Ok(());
    }

    let order = graph.resolution_order(task)?;
    println!("would run, in order:");
    for name in &order {
        println!("  {name}");
        if let Some(spec) = graph.get(name) {
            for pipeline in &spec.pipelines {
                println!("    {pipeline:?}");
            }
        }
    }
    Ok(())
}

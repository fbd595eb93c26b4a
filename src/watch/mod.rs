// src/watch/mod.rs

//! File watching and change-to-action mapping.
//!
//! This module is responsible for:
//! - Compiling watch-rule glob patterns (`rules.rs`).
//! - Wiring up a cross-platform filesystem watcher (`notify`) that turns
//!   change events into controller events (`watcher.rs`).
//! - The controller event loop that re-runs tasks and signals reloads
//!   (`controller.rs`).
//!
//! It does not know how pipelines execute; it only maps filesystem changes
//! to task re-runs or reload signals.

pub mod controller;
pub mod rules;
pub mod watcher;

pub use controller::{Controller, ControllerEvent};
pub use rules::{RuleSet, WatchAction, WatchPlan, WatchRule};
pub use watcher::{WatcherHandle, spawn_watcher};

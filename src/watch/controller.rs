// src/watch/controller.rs

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::serve::ReloadHub;
use crate::tasks::Runner;
use crate::watch::rules::WatchAction;

/// Events consumed by the controller loop: matched watch actions from the
/// watcher, and shutdown from the Ctrl-C handler.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    Action { action: WatchAction, path: String },
    ShutdownRequested,
}

/// The long-running watch controller.
///
/// Events are handled one at a time, in delivery order; a triggered task
/// runs to completion inside the loop before the next event is looked at,
/// so watch-triggered runs never overlap. Task failures are logged and the
/// loop keeps waiting for the next change.
pub struct Controller<'g> {
    runner: Runner<'g>,
    reload: Option<ReloadHub>,
    events_rx: mpsc::Receiver<ControllerEvent>,
}

impl<'g> Controller<'g> {
    pub fn new(
        runner: Runner<'g>,
        reload: Option<ReloadHub>,
        events_rx: mpsc::Receiver<ControllerEvent>,
    ) -> Self {
        Self {
            runner,
            reload,
            events_rx,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        info!("watch controller started");

        while let Some(event) = self.events_rx.recv().await {
            match event {
                ControllerEvent::ShutdownRequested => {
                    info!("shutdown requested, stopping watch controller");
                    break;
                }
                ControllerEvent::Action { action, path } => self.handle_action(action, &path),
            }
        }

        info!("watch controller exiting");
        Ok(())
    }

    fn handle_action(&self, action: WatchAction, path: &str) {
        match action {
            WatchAction::Reload => {
                debug!(path = %path, "change detected; signalling reload");
                self.notify_reload();
            }
            WatchAction::Run { task, reload } => {
                info!(task = %task, path = %path, "change detected; re-running task");
                match self.runner.run(&task) {
                    Ok(report) => {
                        info!(
                            task = %task,
                            executed = ?report.executed,
                            written = report.files_written,
                            "watch-triggered run finished"
                        );
                        if reload {
                            self.notify_reload();
                        }
                    }
                    Err(err) => {
                        error!(task = %task, error = %err, "task failed; continuing to watch");
                    }
                }
            }
        }
    }

    fn notify_reload(&self) {
        if let Some(hub) = &self.reload {
            hub.notify();
        }
    }
}

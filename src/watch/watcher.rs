// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::watch::controller::ControllerEvent;
use crate::watch::rules::RuleSet;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive
/// for as long as needed. Dropping this handle stops file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher observing `root` recursively; every changed
/// path is matched against `rules` and each matching action is forwarded to
/// the controller, in rule order.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    rules: RuleSet,
    controller_tx: mpsc::Sender<ControllerEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or_else(|_| root.clone());

    let rules = Arc::new(rules);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        {
            let event_tx = event_tx.clone();
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Err(err) = event_tx.send(event) {
                        // tracing is unavailable in the notify callback thread.
                        eprintln!("siteforge: failed to forward notify event: {err}");
                    }
                }
                Err(err) => {
                    eprintln!("siteforge: file watch error: {err}");
                }
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    // Async task that consumes notify events and forwards matched actions.
    let async_root = root.clone();
    let async_rules = Arc::clone(&rules);
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!("received notify event: {:?}", event);

            for path in &event.paths {
                let Some(rel) = relative_str(&async_root, path) else {
                    debug!(
                        "path {:?} is outside watch root {:?}; ignoring",
                        path, async_root
                    );
                    continue;
                };

                for action in async_rules.actions_for(&rel) {
                    debug!(path = %rel, ?action, "watch match");
                    if let Err(err) = controller_tx
                        .send(ControllerEvent::Action {
                            action,
                            path: rel.clone(),
                        })
                        .await
                    {
                        warn!("failed to send controller event: {err}");
                        // Controller gone; no point keeping the loop alive.
                        return;
                    }
                }
            }
        }

        debug!("file watcher loop ended");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// Convert a path into a string relative to `root`, with forward slashes.
fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.to_string_lossy().replace('\\', "/"))
}

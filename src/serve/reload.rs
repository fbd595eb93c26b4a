// src/serve/reload.rs

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::debug;

/// Shared reload state: a monotonically increasing generation counter.
///
/// The watch controller bumps the generation after a rebuild; preview
/// clients long-poll [`ReloadHub::wait_past`] and reload when the value they
/// last saw is exceeded. Cheap to clone; all clones share one counter.
#[derive(Clone, Default)]
pub struct ReloadHub {
    inner: Arc<ReloadState>,
}

#[derive(Default)]
struct ReloadState {
    generation: Mutex<u64>,
    changed: Condvar,
}

impl ReloadHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        *lock(&self.inner.generation)
    }

    /// Bump the generation and wake all waiting pollers.
    pub fn notify(&self) {
        let mut generation = lock(&self.inner.generation);
        *generation += 1;
        debug!(generation = *generation, "reload signalled");
        self.inner.changed.notify_all();
    }

    /// Block until the generation exceeds `since`, or `timeout` elapses.
    /// Returns the generation observed on wakeup.
    pub fn wait_past(&self, since: u64, timeout: Duration) -> u64 {
        let deadline = Instant::now() + timeout;
        let mut generation = lock(&self.inner.generation);

        while *generation <= since {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let (guard, wait) = match self.inner.changed.wait_timeout(generation, deadline - now) {
                Ok((guard, wait)) => (guard, wait),
                Err(poisoned) => {
                    let (guard, wait) = poisoned.into_inner();
                    (guard, wait)
                }
            };
            generation = guard;
            if wait.timed_out() {
                break;
            }
        }

        *generation
    }
}

/// Lock that shrugs off poisoning; the counter stays usable either way.
fn lock(mutex: &Mutex<u64>) -> MutexGuard<'_, u64> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

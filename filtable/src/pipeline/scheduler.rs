//! Deferred-tick scheduling.
//!
//! The apply pipeline never runs its matching pass inline; it yields once
//! so the host can paint whatever the `before` listeners changed. The
//! yield goes through the [`Scheduler`] trait so production code defers to
//! tokio while tests drive a virtual clock deterministically.

use std::sync::Mutex;
use std::time::Duration;

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Deferred-tick scheduler for the apply pipeline.
///
/// Each `schedule` call is independent; the pipeline relies on that to
/// keep concurrent passes uncoalesced.
pub trait Scheduler: Send + Sync {
    /// Run `task` once after `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Task);
}

/// Tokio-backed scheduler.
///
/// Spawns one task per call; must be used within a tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    queue: Vec<(Duration, Task)>,
}

/// Manual scheduler driven by a virtual clock.
///
/// Tasks queue up until [`advance`](ManualScheduler::advance) moves the
/// clock past their due time. Tasks run outside the internal lock, so a
/// running task may schedule further work; tasks that become due within
/// the same `advance` window run in due-time order, first-come-first-run
/// on ties.
#[derive(Default)]
pub struct ManualScheduler {
    inner: Mutex<ManualInner>,
}

impl ManualScheduler {
    /// Create a scheduler with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued tasks that have not run yet.
    pub fn pending(&self) -> usize {
        self.inner.lock().map(|inner| inner.queue.len()).unwrap_or(0)
    }

    /// Advance the virtual clock by `by`, running every task that comes
    /// due along the way.
    pub fn advance(&self, by: Duration) {
        let Ok(target) = self.inner.lock().map(|inner| inner.now + by) else {
            return;
        };

        loop {
            let task = {
                let Ok(mut inner) = self.inner.lock() else {
                    return;
                };
                let due_index = inner
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, (due, _))| *due <= target)
                    .min_by_key(|(_, (due, _))| *due)
                    .map(|(index, _)| index);
                match due_index {
                    Some(index) => {
                        let (due, task) = inner.queue.remove(index);
                        inner.now = due;
                        task
                    }
                    None => {
                        inner.now = target;
                        return;
                    }
                }
            };
            task();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        if let Ok(mut inner) = self.inner.lock() {
            let due = inner.now + delay;
            inner.queue.push((due, task));
        }
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

//! Lifecycle notifications emitted around each filtering pass.

use std::sync::RwLock;

/// Row counts reported by the `after` notification.
///
/// Counts reflect the state as of the pass that produced them; with
/// overlapping passes in flight there is no cross-pass ordering
/// guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCounts {
    /// Total body rows at the end of the pass.
    pub total_rows: usize,
    /// Rows left visible by the pass.
    pub visible_rows: usize,
}

/// A lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEvent {
    /// Emitted synchronously when a pass is requested, before the
    /// deferred matching tick is scheduled. Listeners may update UI state
    /// here and the host gets a chance to paint it before matching runs.
    Before,
    /// Emitted when a pass completes, carrying that pass's row counts.
    After(FilterCounts),
}

type Listener = Box<dyn Fn(&FilterEvent) + Send + Sync>;

/// Registry of lifecycle subscribers.
#[derive(Default)]
pub(crate) struct Listeners {
    inner: RwLock<Vec<Listener>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&FilterEvent) + Send + Sync + 'static) {
        if let Ok(mut listeners) = self.inner.write() {
            listeners.push(Box::new(listener));
        }
    }

    pub fn emit(&self, event: &FilterEvent) {
        log::debug!("emit {event:?}");
        if let Ok(listeners) = self.inner.read() {
            for listener in listeners.iter() {
                listener(event);
            }
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.inner.read().map(|l| l.len()).unwrap_or(0);
        f.debug_struct("Listeners").field("count", &count).finish()
    }
}

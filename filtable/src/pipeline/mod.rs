//! The asynchronous apply pipeline.
//!
//! One filtering pass moves through the phases
//! `Idle → BeforeNotified → Scheduled → Applying → AfterNotified → Idle`.
//! The `before` notification fires synchronously so listeners can change
//! UI state immediately; the matching pass itself runs on a short deferred
//! tick, giving the host a chance to paint that state first. The yield is
//! part of the contract, not an optimization.

mod scheduler;

pub use scheduler::{ManualScheduler, Scheduler, Task, TokioScheduler};

use std::sync::Arc;
use std::time::Duration;

use crate::columns;
use crate::error::Error;
use crate::events::{FilterCounts, FilterEvent, Listeners};
use crate::filter::{FilterSpec, row_matches};
use crate::locale::Locale;
use crate::stripe;
use crate::table::TableData;

/// Delay before a scheduled pass runs its matching tick.
pub(crate) const APPLY_DELAY: Duration = Duration::from_millis(10);

/// Phases of one filtering pass.
///
/// Used for diagnostics; each transition is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassPhase {
    Idle,
    BeforeNotified,
    Scheduled,
    Applying,
    AfterNotified,
}

/// Executes filtering passes against the table.
///
/// Each [`apply_filters`](Pipeline::apply_filters) call schedules its own
/// independent deferred tick; rapid-fire calls are not coalesced, so
/// several passes can be in flight at once and their `after` notifications
/// may interleave out of submission order. Consumers must treat an `after`
/// as reporting the state as of that pass, not as strictly sequential.
pub(crate) struct Pipeline {
    scheduler: Arc<dyn Scheduler>,
    pass: Arc<PassContext>,
}

/// Everything one deferred tick needs, shared with the scheduled task.
struct PassContext {
    table: Arc<dyn TableData>,
    listeners: Arc<Listeners>,
    locale: Locale,
    zebra_striping: bool,
}

impl Pipeline {
    pub fn new(
        table: Arc<dyn TableData>,
        scheduler: Arc<dyn Scheduler>,
        listeners: Arc<Listeners>,
        locale: Locale,
        zebra_striping: bool,
    ) -> Self {
        Self {
            scheduler,
            pass: Arc::new(PassContext {
                table,
                listeners,
                locale,
                zebra_striping,
            }),
        }
    }

    /// Start a filtering pass.
    ///
    /// Validates the filter list, emits `before` synchronously, then
    /// schedules the matching pass. Returns [`Error::InvalidFilterList`]
    /// for a spec with no bound columns; out-of-range column indices in a
    /// hand-built spec are not detected here (the row set may change
    /// before the tick runs) and fail fast during matching instead.
    pub fn apply_filters(&self, filters: Vec<FilterSpec>) -> Result<(), Error> {
        validate_filter_list(&filters)?;

        log::debug!("pass {:?} -> {:?}", PassPhase::Idle, PassPhase::BeforeNotified);
        self.pass.listeners.emit(&FilterEvent::Before);

        log::debug!(
            "pass {:?} -> {:?} ({} filters)",
            PassPhase::BeforeNotified,
            PassPhase::Scheduled,
            filters.len()
        );
        let pass = Arc::clone(&self.pass);
        self.scheduler
            .schedule(APPLY_DELAY, Box::new(move || pass.run(filters)));
        Ok(())
    }
}

impl PassContext {
    /// The deferred matching tick.
    ///
    /// Columns are re-resolved here: the row set may have changed since
    /// the pass was scheduled, and an empty table degrades to a pass that
    /// reports zero rows.
    fn run(&self, filters: Vec<FilterSpec>) {
        log::debug!("pass {:?} -> {:?}", PassPhase::Scheduled, PassPhase::Applying);

        if let Err(Error::EmptyTable) = columns::resolve(self.table.as_ref()) {
            log::debug!("table has no rows, pass is a no-op");
            self.finish(FilterCounts {
                total_rows: 0,
                visible_rows: 0,
            });
            return;
        }

        let total_rows = self.table.row_count();
        let mut visible_rows = 0;
        for row in 0..total_rows {
            let visible = row_matches(self.table.as_ref(), row, &filters, &self.locale);
            self.table.set_row_visible(row, visible);
            if visible {
                visible_rows += 1;
            }
        }

        if self.zebra_striping {
            stripe::restripe(self.table.as_ref());
        }

        self.finish(FilterCounts {
            total_rows,
            visible_rows,
        });
    }

    fn finish(&self, counts: FilterCounts) {
        log::debug!(
            "pass {:?} -> {:?} ({}/{} rows visible)",
            PassPhase::Applying,
            PassPhase::AfterNotified,
            counts.visible_rows,
            counts.total_rows
        );
        self.listeners.emit(&FilterEvent::After(counts));
        log::debug!("pass {:?} -> {:?}", PassPhase::AfterNotified, PassPhase::Idle);
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("locale", &self.pass.locale)
            .field("zebra_striping", &self.pass.zebra_striping)
            .finish()
    }
}

fn validate_filter_list(filters: &[FilterSpec]) -> Result<(), Error> {
    for (index, filter) in filters.iter().enumerate() {
        if filter.columns.is_empty() {
            return Err(Error::InvalidFilterList(format!(
                "filter {index} has no bound columns"
            )));
        }
    }
    Ok(())
}

//! The filtering widget facade.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::columns;
use crate::control::Control;
use crate::error::Error;
use crate::events::{FilterEvent, Listeners};
use crate::filter::{FilterSpec, build_filters};
use crate::hash::{self, FragmentHost};
use crate::locale::Locale;
use crate::pipeline::{Pipeline, Scheduler, TokioScheduler};
use crate::stripe;
use crate::table::TableData;

/// Builder for [`Filtable`].
///
/// Obtained from [`Filtable::builder`]. The table provider is required;
/// everything else has a default: no controls, no fragment host, zebra
/// striping off, locale `"en"`, tokio-backed scheduling.
pub struct FiltableBuilder {
    table: Arc<dyn TableData>,
    controls: Vec<Control>,
    zebra_striping: bool,
    locale: Locale,
    scheduler: Option<Arc<dyn Scheduler>>,
    fragment_host: Option<Arc<dyn FragmentHost>>,
}

impl FiltableBuilder {
    fn new(table: Arc<dyn TableData>) -> Self {
        Self {
            table,
            controls: Vec::new(),
            zebra_striping: false,
            locale: Locale::default(),
            scheduler: None,
            fragment_host: None,
        }
    }

    /// Register a control field. Registration order determines filter
    /// spec order and is fixed for the widget's lifetime.
    pub fn control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    /// Register several control fields at once.
    pub fn controls(mut self, controls: impl IntoIterator<Item = Control>) -> Self {
        self.controls.extend(controls);
        self
    }

    /// Enable recomputation of alternating row classes after each pass.
    pub fn zebra_striping(mut self, enabled: bool) -> Self {
        self.zebra_striping = enabled;
        self
    }

    /// Case-folding locale for substring matching.
    pub fn locale(mut self, tag: impl Into<String>) -> Self {
        self.locale = Locale::new(tag);
        self
    }

    /// Override the deferred-tick scheduler (tests use
    /// [`ManualScheduler`](crate::pipeline::ManualScheduler)).
    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Persist hash-bound controls to this fragment host.
    pub fn fragment_host(mut self, host: Arc<dyn FragmentHost>) -> Self {
        self.fragment_host = Some(host);
        self
    }

    /// Build the widget.
    ///
    /// Fails with [`Error::Construction`] when two controls persist under
    /// the same hash key; the fragment could not round-trip both.
    pub fn build(self) -> Result<Filtable, Error> {
        let mut hash_keys = HashSet::new();
        for control in &self.controls {
            if let Some(key) = control.hash_key()
                && !hash_keys.insert(key.clone())
            {
                return Err(Error::Construction(format!("duplicate hash key `{key}`")));
            }
        }

        let listeners = Arc::new(Listeners::new());
        let scheduler = self
            .scheduler
            .unwrap_or_else(|| Arc::new(TokioScheduler));
        let pipeline = Pipeline::new(
            Arc::clone(&self.table),
            scheduler,
            Arc::clone(&listeners),
            self.locale,
            self.zebra_striping,
        );

        Ok(Filtable {
            table: self.table,
            controls: self.controls,
            pipeline,
            listeners,
            fragment_host: self.fragment_host,
            syncing: AtomicBool::new(false),
        })
    }
}

/// The filtering widget.
///
/// Owns its control list and derived filter specs; the table's row data
/// is owned by the host and only read and annotated (visibility, stripe
/// class) through the provider. Each widget instance is self-contained,
/// so several tables on one page get one instance each without
/// interference.
///
/// The host wires its real input events to
/// [`control_changed`](Filtable::control_changed) and its fragment-change
/// notification to [`fragment_changed`](Filtable::fragment_changed), then calls
/// [`refresh`](Filtable::refresh) once after subscribing listeners to run
/// the initial pass.
pub struct Filtable {
    table: Arc<dyn TableData>,
    controls: Vec<Control>,
    pipeline: Pipeline,
    listeners: Arc<Listeners>,
    fragment_host: Option<Arc<dyn FragmentHost>>,
    /// Direction guard: set while this widget writes the fragment, so a
    /// host that echoes the write back cannot trigger a feedback loop.
    syncing: AtomicBool,
}

impl Filtable {
    /// Start building a widget over the given table provider.
    pub fn builder(table: Arc<dyn TableData>) -> FiltableBuilder {
        FiltableBuilder::new(table)
    }

    /// The registered control fields, in registration order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Subscribe to lifecycle notifications.
    ///
    /// `Before` fires synchronously when a pass is requested; `After`
    /// fires from the deferred tick with that pass's row counts.
    pub fn subscribe(&self, listener: impl Fn(&FilterEvent) + Send + Sync + 'static) {
        self.listeners.subscribe(listener);
    }

    /// Build the current filter spec list from all registered controls.
    ///
    /// Returns [`Error::EmptyTable`] when no column set can be resolved;
    /// the widget-level operations downgrade that to a pass over zero
    /// rows.
    pub fn build_filters(&self) -> Result<Vec<FilterSpec>, Error> {
        let valid_columns = columns::resolve(self.table.as_ref())?;
        build_filters(&self.controls, &valid_columns)
    }

    /// Run a filtering pass with an explicit spec list.
    ///
    /// Emits `before` synchronously and schedules the matching pass on
    /// the deferred tick. Passes are not coalesced; see
    /// [`FilterCounts`](crate::events::FilterCounts) for the ordering
    /// caveat on overlapping passes.
    pub fn apply_filters(&self, filters: Vec<FilterSpec>) -> Result<(), Error> {
        self.pipeline.apply_filters(filters)
    }

    /// Recompute alternating stripe classes over currently visible rows.
    pub fn restripe(&self) {
        stripe::restripe(self.table.as_ref());
    }

    /// React to a change of one control's value.
    ///
    /// Rebuilds the filter list, starts a pass, and merges the control's
    /// new value into the URL fragment when the control is hash-bound.
    pub fn control_changed(&self, control: &Control) -> Result<(), Error> {
        log::debug!("control {} changed", control.id());
        self.apply_current_filters()?;

        if let Some(host) = &self.fragment_host {
            self.syncing.store(true, Ordering::SeqCst);
            hash::update_from_control(host.as_ref(), control);
            self.syncing.store(false, Ordering::SeqCst);
        }
        Ok(())
    }

    /// React to an external change of the URL fragment.
    ///
    /// Applies the decoded fragment to the controls and starts a pass.
    /// Ignored while this widget is itself writing the fragment
    /// (direction guard), and a no-op without a fragment host.
    pub fn fragment_changed(&self) -> Result<(), Error> {
        if self.syncing.load(Ordering::SeqCst) {
            log::debug!("fragment change is our own write, ignoring");
            return Ok(());
        }
        let Some(host) = &self.fragment_host else {
            return Ok(());
        };

        let state = hash::decode(&host.fragment());
        hash::apply_to_controls(&state, &self.controls);
        self.apply_current_filters()
    }

    /// Run the initialization sequence: apply the current fragment to the
    /// controls, then start the initial filtering pass.
    ///
    /// Call once after construction, after subscribing listeners so the
    /// initial `before` notification is observed.
    pub fn refresh(&self) -> Result<(), Error> {
        if let Some(host) = &self.fragment_host {
            let state = hash::decode(&host.fragment());
            hash::apply_to_controls(&state, &self.controls);
        }
        self.apply_current_filters()
    }

    /// Build and apply, downgrading an empty table to a pass that reports
    /// zero rows.
    fn apply_current_filters(&self) -> Result<(), Error> {
        let filters = match self.build_filters() {
            Ok(filters) => filters,
            Err(Error::EmptyTable) => Vec::new(),
            Err(err) => return Err(err),
        };
        self.pipeline.apply_filters(filters)
    }
}

impl std::fmt::Debug for Filtable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filtable")
            .field("controls", &self.controls.len())
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

//! Control field state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::Error;

/// Unique identifier for a Control instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(usize);

impl ControlId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__control_{}", self.0)
    }
}

/// The kind of input a control represents.
///
/// The kind decides how the control's current value turns into a filter
/// value: free-text and single-choice controls contribute their raw value,
/// a boolean toggle contributes its match value while active and the empty
/// string otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Free-text input.
    Text,
    /// Single-choice select.
    Select,
    /// Boolean toggle with an associated match value.
    Checkbox,
}

/// Internal state for a Control
#[derive(Debug)]
struct ControlInner {
    /// Current raw value (text and select kinds)
    value: String,
    /// Whether the toggle is active (checkbox kind)
    active: bool,
    /// Value contributed while active (checkbox kind)
    match_value: String,
    /// Explicit bound columns; `None` searches all table columns
    columns: Option<Vec<usize>>,
    /// Key under which this control persists to the URL fragment
    hash_key: Option<String>,
}

/// One external input driving filtering.
///
/// `Control` is a shared-state handle: clones share the same underlying
/// value, so the host can keep one copy wired to its real input element
/// while the widget holds another. The widget's control list is fixed at
/// construction; controls are not added or removed afterwards.
///
/// # Example
///
/// ```ignore
/// let name = Control::text().with_hash_key("name");
/// let status = Control::select().with_columns([2]).with_hash_key("status");
/// let in_stock = Control::checkbox("yes").with_column_binding("3")?;
/// ```
#[derive(Debug)]
pub struct Control {
    /// Unique identifier for this control instance
    id: ControlId,
    /// Internal state
    inner: Arc<RwLock<ControlInner>>,
    kind: ControlKind,
}

impl Control {
    fn with_kind(kind: ControlKind, match_value: String) -> Self {
        Self {
            id: ControlId::new(),
            inner: Arc::new(RwLock::new(ControlInner {
                value: String::new(),
                active: false,
                match_value,
                columns: None,
                hash_key: None,
            })),
            kind,
        }
    }

    /// Create a free-text control.
    pub fn text() -> Self {
        Self::with_kind(ControlKind::Text, String::new())
    }

    /// Create a single-choice control.
    pub fn select() -> Self {
        Self::with_kind(ControlKind::Select, String::new())
    }

    /// Create a boolean-toggle control contributing `match_value` while
    /// active.
    pub fn checkbox(match_value: impl Into<String>) -> Self {
        Self::with_kind(ControlKind::Checkbox, match_value.into())
    }

    /// Bind this control to an explicit set of column indices.
    ///
    /// Indices are validated against the table's column count on every
    /// filtering pass, not here; the table may not even exist yet.
    pub fn with_columns(self, columns: impl IntoIterator<Item = usize>) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.columns = Some(columns.into_iter().collect());
        }
        self
    }

    /// Bind columns from a comma-separated binding string, e.g. `"0,2"`.
    ///
    /// This is the form hosts read straight out of a column-binding markup
    /// attribute. A non-numeric entry is a construction error.
    pub fn with_column_binding(self, binding: &str) -> Result<Self, Error> {
        let columns = parse_column_binding(binding)?;
        Ok(self.with_columns(columns))
    }

    /// Persist this control's value to the URL fragment under `key`.
    pub fn with_hash_key(self, key: impl Into<String>) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.hash_key = Some(key.into());
        }
        self
    }

    /// Get the unique ID for this control
    pub fn id(&self) -> ControlId {
        self.id
    }

    /// The control's kind.
    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Current raw value.
    pub fn value(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or_default()
    }

    /// Whether the toggle is active. Always `false` for non-checkbox kinds.
    pub fn is_active(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.active)
            .unwrap_or(false)
    }

    /// The match value contributed while a checkbox is active.
    pub fn match_value(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.match_value.clone())
            .unwrap_or_default()
    }

    /// Explicitly bound columns, or `None` for an unscoped control.
    pub fn columns(&self) -> Option<Vec<usize>> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.columns.clone())
    }

    /// The hash key this control persists under, if any.
    pub fn hash_key(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.hash_key.clone())
    }

    /// The value this control currently contributes to filtering.
    ///
    /// A checkbox contributes its match value while active and the empty
    /// string (no constraint) while inactive; other kinds contribute
    /// their raw value.
    pub fn filter_value(&self) -> String {
        match self.kind {
            ControlKind::Checkbox => {
                if self.is_active() {
                    self.match_value()
                } else {
                    String::new()
                }
            }
            ControlKind::Text | ControlKind::Select => self.value(),
        }
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Set the raw value.
    pub fn set_value(&self, value: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value = value.into();
        }
    }

    /// Set the toggle's active state.
    pub fn set_active(&self, active: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.active = active;
        }
    }
}

impl Clone for Control {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            kind: self.kind,
        }
    }
}

/// Parse a comma-separated column binding string into column indices.
///
/// `"0,2"` becomes `[0, 2]`. Whitespace around entries is tolerated.
/// Empty or non-numeric entries are a configuration error surfaced at
/// setup, before any filtering runs.
pub fn parse_column_binding(binding: &str) -> Result<Vec<usize>, Error> {
    if binding.trim().is_empty() {
        return Err(Error::Construction("empty column binding".into()));
    }
    binding
        .split(',')
        .map(|part| {
            part.trim().parse::<usize>().map_err(|_| {
                Error::Construction(format!("invalid column binding entry `{}`", part.trim()))
            })
        })
        .collect()
}

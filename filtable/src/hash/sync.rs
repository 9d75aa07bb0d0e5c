//! Fragment host abstraction and control synchronization.

use std::sync::RwLock;

use crate::control::{Control, ControlKind};

use super::{HashState, decode, encode};

/// Host access to the page's URL fragment.
///
/// The engine reads the fragment at initialization and on every external
/// fragment-change notification, and writes it when a hash-bound control
/// changes.
pub trait FragmentHost: Send + Sync {
    /// The current fragment, without the leading `#`.
    fn fragment(&self) -> String;

    /// Replace the fragment; `None` clears it entirely.
    ///
    /// The replacement must not navigate and must not create a history
    /// entry, and the host must not report it back as an external
    /// fragment change — the widget guards against the echo, but the
    /// contract is on the host.
    fn replace_fragment(&self, fragment: Option<&str>);
}

/// In-memory fragment host for tests and browserless embedding.
#[derive(Debug, Default)]
pub struct MemoryFragmentHost {
    fragment: RwLock<String>,
}

impl MemoryFragmentHost {
    /// Create a host with an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host with an initial fragment (without the leading `#`).
    pub fn with_fragment(fragment: impl Into<String>) -> Self {
        Self {
            fragment: RwLock::new(fragment.into()),
        }
    }

    /// Set the fragment as an external navigation would.
    pub fn set_fragment(&self, fragment: impl Into<String>) {
        if let Ok(mut guard) = self.fragment.write() {
            *guard = fragment.into();
        }
    }
}

impl FragmentHost for MemoryFragmentHost {
    fn fragment(&self) -> String {
        self.fragment
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn replace_fragment(&self, fragment: Option<&str>) {
        if let Ok(mut guard) = self.fragment.write() {
            *guard = fragment.unwrap_or_default().to_string();
        }
    }
}

/// Apply decoded fragment state to matching controls.
///
/// Controls without a hash key, and hash keys without a matching control,
/// are skipped. A checkbox becomes active iff the decoded value equals
/// its match value; other kinds take the decoded value verbatim (an empty
/// decoded value clears the control).
pub fn apply_to_controls(state: &HashState, controls: &[Control]) {
    for control in controls {
        let Some(key) = control.hash_key() else {
            continue;
        };
        let Some(value) = state.get(&key) else {
            continue;
        };
        match control.kind() {
            ControlKind::Checkbox => control.set_active(value == control.match_value()),
            ControlKind::Text | ControlKind::Select => control.set_value(value),
        }
    }
}

/// Merge one control's current value into the fragment.
///
/// No-op for controls without a hash key. The control's effective filter
/// value is merged into the freshly decoded state — keys the widget does
/// not manage survive the merge — and the result is re-encoded and
/// written through the host's non-navigating replace.
pub fn update_from_control(host: &dyn FragmentHost, control: &Control) {
    let Some(key) = control.hash_key() else {
        return;
    };

    let mut state = decode(&host.fragment());
    state.set(key, control.filter_value());

    let encoded = encode(&state);
    log::debug!("control {} updates fragment to {encoded:?}", control.id());
    host.replace_fragment(encoded.as_deref());
}

//! URL fragment persistence of filter state.
//!
//! Filter state round-trips through the page's URL fragment as
//! `#key1=value1&key2=value2`. Keys and values are raw strings, not
//! percent-encoded; values containing `&` or `=` are unsupported.
//! Percent-encoding would change the wire format and silently break
//! existing shared links, so it stays raw.

mod sync;

pub use sync::{FragmentHost, MemoryFragmentHost, apply_to_controls, update_from_control};

/// In-memory decoding of the URL fragment: an ordered `key → value` map.
///
/// Keys keep first-seen order, so re-encoding after a merge is
/// deterministic and stable across passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashState {
    entries: Vec<(String, String)>,
}

impl HashState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace a value, preserving first-seen key order.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Number of entries, including empty-valued ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the state holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Decode a fragment (without the leading `#`) into filter state.
///
/// Tolerant of an empty fragment (empty state). Each pair splits on the
/// first `=`; pairs without an `=` are silently ignored, not fatal. An
/// empty value is retained here — applying it to a control clears that
/// control — and dropped again by [`encode`].
pub fn decode(fragment: &str) -> HashState {
    let mut state = HashState::new();
    if fragment.is_empty() {
        return state;
    }
    for pair in fragment.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        state.set(key, value);
    }
    state
}

/// Encode state as a fragment string.
///
/// Keys with empty values are omitted. Returns `None` when nothing
/// remains: the caller must then clear the fragment entirely (bare path)
/// rather than leave an empty `#` behind.
pub fn encode(state: &HashState) -> Option<String> {
    let mut fragment = String::new();
    for (key, value) in state.iter() {
        if value.is_empty() {
            continue;
        }
        if !fragment.is_empty() {
            fragment.push('&');
        }
        fragment.push_str(key);
        fragment.push('=');
        fragment.push_str(value);
    }
    if fragment.is_empty() { None } else { Some(fragment) }
}

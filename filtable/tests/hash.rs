//! Fragment encoding, decoding, and control synchronization.

use filtable::control::Control;
use filtable::hash::{
    FragmentHost, HashState, MemoryFragmentHost, apply_to_controls, decode, encode,
    update_from_control,
};

#[test]
fn test_decode_empty_fragment() {
    assert!(decode("").is_empty());
}

#[test]
fn test_decode_key_value_pairs() {
    let state = decode("status=active&name=smith");
    assert_eq!(state.get("status"), Some("active"));
    assert_eq!(state.get("name"), Some("smith"));
    assert_eq!(state.len(), 2);
}

#[test]
fn test_decode_ignores_pairs_without_equals() {
    let state = decode("status=active&garbage&name=smith");
    assert_eq!(state.len(), 2);
    assert_eq!(state.get("garbage"), None);
}

#[test]
fn test_decode_splits_on_first_equals() {
    let state = decode("expr=a=b");
    assert_eq!(state.get("expr"), Some("a=b"));
}

#[test]
fn test_round_trip_without_empty_values() {
    let mut state = HashState::new();
    state.set("status", "active");
    state.set("name", "smith");

    let fragment = encode(&state).unwrap();
    assert_eq!(decode(&fragment), state);
}

#[test]
fn test_encode_drops_empty_values() {
    // An empty entry survives decoding but is not retained on re-encode
    let state = decode("status=active&name=");
    assert_eq!(state.get("name"), Some(""));
    assert_eq!(encode(&state).unwrap(), "status=active");
}

#[test]
fn test_encode_of_nothing_clears_the_fragment() {
    let state = decode("name=");
    assert_eq!(encode(&state), None);
    assert_eq!(encode(&HashState::new()), None);
}

#[test]
fn test_encode_preserves_insertion_order() {
    let mut state = HashState::new();
    state.set("b", "2");
    state.set("a", "1");
    state.set("b", "3");
    assert_eq!(encode(&state).unwrap(), "b=3&a=1");
}

#[test]
fn test_apply_to_controls_sets_values() {
    let name = Control::text().with_hash_key("name");
    let status = Control::select().with_hash_key("status");
    let unbound = Control::text();
    unbound.set_value("untouched");

    let state = decode("status=active&name=smith&unknown=x");
    apply_to_controls(&state, &[name.clone(), status.clone(), unbound.clone()]);

    assert_eq!(name.value(), "smith");
    assert_eq!(status.value(), "active");
    assert_eq!(unbound.value(), "untouched");
}

#[test]
fn test_apply_to_controls_clears_on_empty_value() {
    let name = Control::text().with_hash_key("name");
    name.set_value("smith");

    apply_to_controls(&decode("name="), &[name.clone()]);
    assert_eq!(name.value(), "");
}

#[test]
fn test_apply_to_controls_checkbox_matches_its_value() {
    let toggle = Control::checkbox("yes").with_hash_key("instock");

    apply_to_controls(&decode("instock=yes"), std::slice::from_ref(&toggle));
    assert!(toggle.is_active());

    apply_to_controls(&decode("instock=no"), std::slice::from_ref(&toggle));
    assert!(!toggle.is_active());
}

#[test]
fn test_update_from_control_merges_existing_state() {
    let host = MemoryFragmentHost::with_fragment("other=kept");
    let name = Control::text().with_hash_key("name");
    name.set_value("smith");

    update_from_control(&host, &name);
    assert_eq!(host.fragment(), "other=kept&name=smith");
}

#[test]
fn test_update_from_control_without_hash_key_is_noop() {
    let host = MemoryFragmentHost::with_fragment("other=kept");
    let name = Control::text();
    name.set_value("smith");

    update_from_control(&host, &name);
    assert_eq!(host.fragment(), "other=kept");
}

#[test]
fn test_update_from_control_clears_fragment_when_empty() {
    let host = MemoryFragmentHost::with_fragment("name=smith");
    let name = Control::text().with_hash_key("name");
    name.set_value("");

    update_from_control(&host, &name);
    assert_eq!(host.fragment(), "");
}

#[test]
fn test_update_from_inactive_checkbox_drops_its_key() {
    let host = MemoryFragmentHost::with_fragment("instock=yes&name=smith");
    let toggle = Control::checkbox("yes").with_hash_key("instock");

    update_from_control(&host, &toggle);
    assert_eq!(host.fragment(), "name=smith");
}

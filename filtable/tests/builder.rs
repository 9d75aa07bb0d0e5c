//! Filter spec building from control fields.

use filtable::Error;
use filtable::control::{Control, parse_column_binding};
use filtable::filter::{FilterSpec, build_filters};

#[test]
fn test_specs_follow_registration_order() {
    let first = Control::text();
    first.set_value("a");
    let second = Control::select();
    second.set_value("b");

    let filters = build_filters(&[first, second], &[0, 1]).unwrap();
    assert_eq!(filters.len(), 2);
    assert_eq!(filters[0].value, "a");
    assert_eq!(filters[1].value, "b");
}

#[test]
fn test_unscoped_control_searches_all_columns() {
    let control = Control::text();
    control.set_value("x");

    let filters = build_filters(&[control], &[0, 1, 2]).unwrap();
    assert_eq!(filters, vec![FilterSpec::new(vec![0, 1, 2], "x")]);
}

#[test]
fn test_scoped_control_keeps_its_columns() {
    let control = Control::text().with_columns([2, 0]);
    control.set_value("x");

    let filters = build_filters(&[control], &[0, 1, 2]).unwrap();
    assert_eq!(filters, vec![FilterSpec::new(vec![2, 0], "x")]);
}

#[test]
fn test_out_of_range_column_is_fatal() {
    let control = Control::text().with_columns([3]);

    let err = build_filters(&[control], &[0, 1]).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidColumn {
            column: 3,
            column_count: 2,
        }
    );
}

#[test]
fn test_checkbox_contributes_match_value_only_while_active() {
    let checkbox = Control::checkbox("yes");

    let filters = build_filters(std::slice::from_ref(&checkbox), &[0]).unwrap();
    assert!(filters[0].is_trivial());

    checkbox.set_active(true);
    let filters = build_filters(std::slice::from_ref(&checkbox), &[0]).unwrap();
    assert_eq!(filters[0].value, "yes");
}

#[test]
fn test_checkbox_raw_value_is_ignored() {
    let checkbox = Control::checkbox("yes");
    checkbox.set_value("unrelated");

    let filters = build_filters(&[checkbox], &[0]).unwrap();
    assert!(filters[0].is_trivial());
}

#[test]
fn test_specs_are_rebuilt_fresh() {
    let control = Control::text();
    control.set_value("first");
    let before = build_filters(std::slice::from_ref(&control), &[0]).unwrap();

    control.set_value("second");
    let after = build_filters(std::slice::from_ref(&control), &[0]).unwrap();

    assert_eq!(before[0].value, "first");
    assert_eq!(after[0].value, "second");
}

#[test]
fn test_parse_column_binding() {
    assert_eq!(parse_column_binding("0,2").unwrap(), vec![0, 2]);
    assert_eq!(parse_column_binding(" 1 , 3 ").unwrap(), vec![1, 3]);
    assert_eq!(parse_column_binding("4").unwrap(), vec![4]);
}

#[test]
fn test_parse_column_binding_rejects_garbage() {
    assert!(matches!(
        parse_column_binding("a,b"),
        Err(Error::Construction(_))
    ));
    assert!(matches!(
        parse_column_binding(""),
        Err(Error::Construction(_))
    ));
}

#[test]
fn test_column_binding_string_on_control() {
    let control = Control::text().with_column_binding("0, 2").unwrap();
    assert_eq!(control.columns(), Some(vec![0, 2]));
}

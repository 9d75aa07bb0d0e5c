//! Apply pipeline scheduling, notifications, and counts.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use filtable::Error;
use filtable::events::{FilterCounts, FilterEvent};
use filtable::filter::FilterSpec;
use filtable::pipeline::ManualScheduler;
use filtable::stripe::Stripe;
use filtable::table::{MemoryTable, TableData};
use filtable::widget::Filtable;

const TICK: Duration = Duration::from_millis(10);

struct Fixture {
    widget: Filtable,
    table: MemoryTable,
    scheduler: Arc<ManualScheduler>,
    events: Arc<Mutex<Vec<FilterEvent>>>,
}

fn fixture(zebra: bool) -> Fixture {
    let table = MemoryTable::new();
    table.push_text_row(&["apple", "1"]);
    table.push_text_row(&["banana", "2"]);
    table.push_text_row(&["Apple Pie", "3"]);

    let scheduler = Arc::new(ManualScheduler::new());
    let widget = Filtable::builder(Arc::new(table.clone()))
        .zebra_striping(zebra)
        .scheduler(scheduler.clone())
        .build()
        .unwrap();

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    widget.subscribe(move |event| sink.lock().unwrap().push(*event));

    Fixture {
        widget,
        table,
        scheduler,
        events,
    }
}

fn recorded(events: &Arc<Mutex<Vec<FilterEvent>>>) -> Vec<FilterEvent> {
    events.lock().unwrap().clone()
}

#[test]
fn test_before_fires_synchronously_and_pass_is_deferred() {
    let f = fixture(false);
    f.widget
        .apply_filters(vec![FilterSpec::new(vec![0], "apple")])
        .unwrap();

    // Only the before notification so far; no visibility changed yet
    assert_eq!(recorded(&f.events), vec![FilterEvent::Before]);
    assert_eq!(f.table.visible_rows(), vec![0, 1, 2]);
    assert_eq!(f.scheduler.pending(), 1);

    f.scheduler.advance(TICK);
    assert_eq!(f.table.visible_rows(), vec![0, 2]);
    assert_eq!(
        recorded(&f.events),
        vec![
            FilterEvent::Before,
            FilterEvent::After(FilterCounts {
                total_rows: 3,
                visible_rows: 2,
            }),
        ]
    );
}

#[test]
fn test_cleared_filter_restores_all_rows() {
    let f = fixture(false);
    f.widget
        .apply_filters(vec![FilterSpec::new(vec![0], "banana")])
        .unwrap();
    f.scheduler.advance(TICK);
    assert_eq!(f.table.visible_rows(), vec![1]);

    // An empty value imposes no constraint
    f.widget
        .apply_filters(vec![FilterSpec::new(vec![0], "")])
        .unwrap();
    f.scheduler.advance(TICK);
    assert_eq!(f.table.visible_rows(), vec![0, 1, 2]);
}

#[test]
fn test_overlapping_passes_are_not_coalesced() {
    let f = fixture(false);
    f.widget
        .apply_filters(vec![FilterSpec::new(vec![0], "apple")])
        .unwrap();
    f.widget
        .apply_filters(vec![FilterSpec::new(vec![0], "banana")])
        .unwrap();

    // Two independent ticks in flight
    assert_eq!(f.scheduler.pending(), 2);
    f.scheduler.advance(TICK);

    let events = recorded(&f.events);
    assert_eq!(events[..2], [FilterEvent::Before, FilterEvent::Before]);
    let afters = events
        .iter()
        .filter(|e| matches!(e, FilterEvent::After(_)))
        .count();
    assert_eq!(afters, 2);

    // Ticks run in submission order here, so the later pass wins
    assert_eq!(f.table.visible_rows(), vec![1]);
}

#[test]
fn test_empty_table_pass_reports_zero_rows() {
    let table = MemoryTable::new();
    let scheduler = Arc::new(ManualScheduler::new());
    let widget = Filtable::builder(Arc::new(table))
        .scheduler(scheduler.clone())
        .build()
        .unwrap();

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    widget.subscribe(move |event| sink.lock().unwrap().push(*event));

    widget.apply_filters(Vec::new()).unwrap();
    scheduler.advance(TICK);

    assert_eq!(
        recorded(&events),
        vec![
            FilterEvent::Before,
            FilterEvent::After(FilterCounts {
                total_rows: 0,
                visible_rows: 0,
            }),
        ]
    );
}

#[test]
fn test_spec_without_columns_is_rejected() {
    let f = fixture(false);
    let err = f
        .widget
        .apply_filters(vec![FilterSpec::new(Vec::new(), "x")])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidFilterList(_)));

    // Rejected synchronously: nothing was notified or scheduled
    assert!(recorded(&f.events).is_empty());
    assert_eq!(f.scheduler.pending(), 0);
}

#[test]
fn test_zebra_striping_runs_after_the_pass() {
    let f = fixture(true);
    f.widget
        .apply_filters(vec![FilterSpec::new(vec![0], "apple")])
        .unwrap();
    f.scheduler.advance(TICK);

    assert_eq!(f.table.row_stripe(0), Some(Stripe::Odd));
    assert_eq!(f.table.row_stripe(1), None);
    assert_eq!(f.table.row_stripe(2), Some(Stripe::Even));
}

#[test]
fn test_rows_added_during_the_yield_are_seen_by_the_pass() {
    let f = fixture(false);
    f.widget
        .apply_filters(vec![FilterSpec::new(vec![0], "apple")])
        .unwrap();

    // The row set changes between scheduling and the tick; the pass
    // re-reads table state instead of assuming exclusive access
    f.table.push_text_row(&["crab apple", "4"]);
    f.scheduler.advance(TICK);

    assert_eq!(f.table.visible_rows(), vec![0, 2, 3]);
    let last = *recorded(&f.events).last().unwrap();
    assert_eq!(
        last,
        FilterEvent::After(FilterCounts {
            total_rows: 4,
            visible_rows: 3,
        })
    );
}

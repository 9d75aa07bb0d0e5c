//! Row matching.

use crate::locale::Locale;
use crate::table::TableData;

use super::FilterSpec;

/// Decide whether a row stays visible under the given filter list.
///
/// A row is visible iff every spec is satisfied (AND across specs). A
/// spec with an empty value is trivially satisfied and skipped; otherwise
/// it is satisfied iff at least one of its bound columns matches (OR
/// across columns within a spec).
///
/// Per-column rule: a cell with an exact-match override is compared to
/// the filter value byte-for-byte; any other cell matches when its
/// display text contains the filter value after case folding. The
/// asymmetry is deliberate — it lets individual columns opt into precise
/// matching while the rest of the table keeps fuzzy search.
///
/// # Panics
///
/// Panics if a bound column has no cell in this row. A row with fewer
/// cells than the table's column count is a configuration inconsistency,
/// and matching against missing data would be undefined.
pub fn row_matches(
    table: &dyn TableData,
    row: usize,
    filters: &[FilterSpec],
    locale: &Locale,
) -> bool {
    for filter in filters {
        if filter.is_trivial() {
            continue;
        }

        let mut satisfied = false;
        for &column in &filter.columns {
            if cell_matches(table, row, column, &filter.value, locale) {
                satisfied = true;
                break;
            }
        }

        if !satisfied {
            return false;
        }
    }

    true
}

fn cell_matches(
    table: &dyn TableData,
    row: usize,
    column: usize,
    value: &str,
    locale: &Locale,
) -> bool {
    if let Some(exact) = table.match_override(row, column) {
        return exact == value;
    }

    let Some(text) = table.cell_text(row, column) else {
        panic!("row {row} has no cell in column {column}: table data is inconsistent with its column count");
    };
    locale.contains(&text, value)
}

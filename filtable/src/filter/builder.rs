//! Building filter specs from control fields.

use crate::control::Control;
use crate::error::Error;

use super::FilterSpec;

/// Build one filter spec per control field.
///
/// Output order matches control registration order, so passes are
/// reproducible and the fragment encoding is deterministic. A control
/// with explicit bound columns has each index validated against
/// `valid_columns`; any out-of-range index is [`Error::InvalidColumn`]
/// (fatal, not recoverable). A control without bindings searches all
/// valid columns.
pub fn build_filters(controls: &[Control], valid_columns: &[usize]) -> Result<Vec<FilterSpec>, Error> {
    let mut filters = Vec::with_capacity(controls.len());
    for control in controls {
        let columns = match control.columns() {
            Some(columns) => {
                validate_columns(&columns, valid_columns)?;
                columns
            }
            None => valid_columns.to_vec(),
        };
        filters.push(FilterSpec::new(columns, control.filter_value()));
    }
    Ok(filters)
}

fn validate_columns(columns: &[usize], valid_columns: &[usize]) -> Result<(), Error> {
    for &column in columns {
        if !valid_columns.contains(&column) {
            return Err(Error::InvalidColumn {
                column,
                column_count: valid_columns.len(),
            });
        }
    }
    Ok(())
}

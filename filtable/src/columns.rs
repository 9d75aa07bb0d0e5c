//! Column index resolution.

use crate::error::Error;
use crate::table::TableData;

/// Resolve the valid set of column positions for a table.
///
/// The column count is derived from the cell count of the table's first
/// row. Returns [`Error::EmptyTable`] when the table has no rows; callers
/// treat that as "filtering is a no-op", not as a failure.
///
/// The result is a pure function of table state at call time. The row set
/// can change between filtering passes, so the pipeline calls this on
/// every pass instead of caching.
pub fn resolve(table: &dyn TableData) -> Result<Vec<usize>, Error> {
    if table.row_count() == 0 {
        return Err(Error::EmptyTable);
    }
    Ok((0..table.cell_count(0)).collect())
}

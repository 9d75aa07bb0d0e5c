//! Error types for widget construction and filtering.

use thiserror::Error;

/// Errors raised by the filtering engine.
///
/// Every variant is a programmer or configuration error, surfaced
/// synchronously at the call that detects it. None are retried and none
/// are silently downgraded; the one exception is [`Error::EmptyTable`],
/// which the widget catches and turns into a pass reporting zero rows
/// (a zero-row table is a degenerate valid state, not a failure).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid input supplied at construction time.
    #[error("invalid widget construction: {0}")]
    Construction(String),

    /// A control references a column outside the table's current column
    /// count.
    #[error("invalid column {column} in column binding (table has {column_count} columns)")]
    InvalidColumn {
        /// The out-of-range column index.
        column: usize,
        /// The table's column count at the time of validation.
        column_count: usize,
    },

    /// A malformed filter list was handed to the apply pipeline.
    #[error("invalid filter list: {0}")]
    InvalidFilterList(String),

    /// The table currently has no rows, so no column set can be resolved.
    #[error("table has no rows")]
    EmptyTable,
}

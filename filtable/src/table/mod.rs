//! Table data provider abstraction.
//!
//! The engine never talks to a concrete table representation. Everything
//! it needs — row and cell counts, display text, exact-match overrides —
//! and everything it writes back — visibility and stripe annotations —
//! goes through [`TableData`]. A host embedding the engine implements the
//! trait over its real table; tests and the bundled example use
//! [`MemoryTable`].

mod memory;

pub use memory::{MemoryCell, MemoryTable};

use crate::stripe::Stripe;

/// Read/annotate access to a table's rows.
///
/// The row data is owned by the host; the engine only reads it and
/// annotates rows with derived visibility and stripe state. There are
/// deliberately no operations for reordering or deleting rows.
///
/// Row and column positions are zero-based. The row set may change
/// between filtering passes; the engine re-reads counts on every pass
/// rather than caching them.
pub trait TableData: Send + Sync {
    /// Number of body rows currently in the table.
    fn row_count(&self) -> usize;

    /// Number of cells in the given row.
    fn cell_count(&self, row: usize) -> usize;

    /// Display text of a cell, or `None` if the row has no such cell.
    fn cell_text(&self, row: usize, col: usize) -> Option<String>;

    /// Exact-match override declared on a cell, if any.
    ///
    /// A cell carrying an override is compared against filter values by
    /// strict string equality instead of substring containment.
    fn match_override(&self, row: usize, col: usize) -> Option<String>;

    /// Set a row's derived visibility.
    fn set_row_visible(&self, row: usize, visible: bool);

    /// A row's current visibility. Rows start out visible.
    fn row_visible(&self, row: usize) -> bool;

    /// Set or clear a row's stripe class.
    fn set_row_stripe(&self, row: usize, stripe: Option<Stripe>);

    /// A row's current stripe class.
    fn row_stripe(&self, row: usize) -> Option<Stripe>;
}

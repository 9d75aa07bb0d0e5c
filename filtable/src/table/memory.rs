//! In-memory table provider.

use std::sync::{Arc, RwLock};

use crate::stripe::Stripe;

use super::TableData;

/// One cell of a [`MemoryTable`] row.
#[derive(Debug, Clone)]
pub struct MemoryCell {
    /// Display text, used for substring matching.
    text: String,
    /// Exact-match override value, if declared.
    match_override: Option<String>,
}

impl MemoryCell {
    /// Create a cell with display text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            match_override: None,
        }
    }

    /// Declare an exact-match override for this cell.
    ///
    /// Overridden cells opt into precise matching (status codes, ids)
    /// while the rest of the table keeps fuzzy substring search.
    pub fn with_override(mut self, value: impl Into<String>) -> Self {
        self.match_override = Some(value.into());
        self
    }
}

/// Internal state for one row.
#[derive(Debug)]
struct RowInner {
    cells: Vec<MemoryCell>,
    visible: bool,
    stripe: Option<Stripe>,
}

/// An in-memory [`TableData`] implementation.
///
/// Backs the integration tests and the bundled example; also usable by
/// hosts that hold tabular data outside any rendering tree. The handle is
/// cheap to clone and clones share state, so one copy can be handed to the
/// widget while the host keeps another for assertions or row updates.
#[derive(Debug, Default)]
pub struct MemoryTable {
    rows: Arc<RwLock<Vec<RowInner>>>,
}

impl MemoryTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row of cells. Rows start out visible with no stripe.
    pub fn push_row(&self, cells: Vec<MemoryCell>) {
        if let Ok(mut rows) = self.rows.write() {
            rows.push(RowInner {
                cells,
                visible: true,
                stripe: None,
            });
        }
    }

    /// Append a row of plain-text cells.
    pub fn push_text_row(&self, texts: &[&str]) {
        self.push_row(texts.iter().copied().map(MemoryCell::new).collect());
    }

    /// Remove all rows.
    pub fn clear(&self) {
        if let Ok(mut rows) = self.rows.write() {
            rows.clear();
        }
    }

    /// Indices of currently visible rows, in row order.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.rows
            .read()
            .map(|rows| {
                rows.iter()
                    .enumerate()
                    .filter(|(_, row)| row.visible)
                    .map(|(i, _)| i)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Clone for MemoryTable {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl TableData for MemoryTable {
    fn row_count(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    fn cell_count(&self, row: usize) -> usize {
        self.rows
            .read()
            .ok()
            .and_then(|rows| rows.get(row).map(|r| r.cells.len()))
            .unwrap_or(0)
    }

    fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        self.rows
            .read()
            .ok()
            .and_then(|rows| rows.get(row)?.cells.get(col).map(|c| c.text.clone()))
    }

    fn match_override(&self, row: usize, col: usize) -> Option<String> {
        self.rows
            .read()
            .ok()
            .and_then(|rows| rows.get(row)?.cells.get(col)?.match_override.clone())
    }

    fn set_row_visible(&self, row: usize, visible: bool) {
        if let Ok(mut rows) = self.rows.write()
            && let Some(r) = rows.get_mut(row)
        {
            r.visible = visible;
        }
    }

    fn row_visible(&self, row: usize) -> bool {
        self.rows
            .read()
            .ok()
            .and_then(|rows| rows.get(row).map(|r| r.visible))
            .unwrap_or(false)
    }

    fn set_row_stripe(&self, row: usize, stripe: Option<Stripe>) {
        if let Ok(mut rows) = self.rows.write()
            && let Some(r) = rows.get_mut(row)
        {
            r.stripe = stripe;
        }
    }

    fn row_stripe(&self, row: usize) -> Option<Stripe> {
        self.rows
            .read()
            .ok()
            .and_then(|rows| rows.get(row).and_then(|r| r.stripe))
    }
}

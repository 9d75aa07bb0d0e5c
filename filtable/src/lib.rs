//! Row filtering widget engine.
//!
//! External control fields (text inputs, selects, checkboxes) drive the
//! visibility of table rows: each control becomes a normalized filter spec,
//! every spec must be satisfied for a row to stay visible (AND across
//! specs), and within one spec any bound column may match (OR across
//! columns). Filter state optionally round-trips through a `key=value`
//! URL-fragment encoding, and an optional striping pass reassigns
//! alternating row classes after each filter pass.
//!
//! The engine is headless. The table sits behind the [`table::TableData`]
//! provider trait and the page URL behind [`hash::FragmentHost`], so the
//! whole thing runs without a rendering environment; the deferred tick that
//! keeps filtering from blocking the host's paint is injected via
//! [`pipeline::Scheduler`].
//!
//! [`widget::Filtable`] ties the pieces together: construct it with a
//! builder, subscribe to lifecycle notifications, then forward control and
//! fragment changes to it.

pub mod columns;
pub mod control;
pub mod error;
pub mod events;
pub mod filter;
pub mod hash;
pub mod locale;
pub mod pipeline;
pub mod stripe;
pub mod table;
pub mod widget;

pub use error::Error;
pub use widget::{Filtable, FiltableBuilder};

pub mod prelude {
    pub use crate::control::{Control, ControlId, ControlKind};
    pub use crate::error::Error;
    pub use crate::events::{FilterCounts, FilterEvent};
    pub use crate::filter::FilterSpec;
    pub use crate::hash::{FragmentHost, HashState, MemoryFragmentHost};
    pub use crate::locale::Locale;
    pub use crate::pipeline::{ManualScheduler, Scheduler, TokioScheduler};
    pub use crate::stripe::Stripe;
    pub use crate::table::{MemoryCell, MemoryTable, TableData};
    pub use crate::widget::{Filtable, FiltableBuilder};
}

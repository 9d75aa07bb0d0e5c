//! Control fields - the external inputs that drive filtering.

mod state;

pub use state::{Control, ControlId, ControlKind, parse_column_binding};

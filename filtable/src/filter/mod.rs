//! Filter specs, the spec builder, and the row matcher.

mod builder;
mod matcher;
mod spec;

pub use builder::build_filters;
pub use matcher::row_matches;
pub use spec::FilterSpec;

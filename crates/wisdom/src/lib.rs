//! Per-variable rendering metadata ("wisdom") and unit conversion.
//!
//! The registry is compiled-in static data: extending it to new variables is
//! a configuration-time change, not a runtime one. Nothing here is mutated
//! after startup, so the tables are trivially shareable across threads.

pub mod range;
pub mod registry;
pub mod units;

pub use range::{clamp_field, resolve_range, RenderRange};
pub use registry::{known_variables, lookup, ScalePolicy, VarWisdom};
pub use units::{convert, convert_field};

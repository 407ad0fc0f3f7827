//! Branch switching
//!
//! A switch must not silently destroy uncommitted local work. The engine
//! first categorizes every path against the source and destination tips,
//! refuses the whole switch if any local change would be overwritten, and
//! only then produces a plan that carries the preserved local state across
//! the switch.
//!
//! - `conflict`: the rejection value listing the offending paths
//! - `switch`: categorization and the switch plan

pub mod conflict;
pub mod switch;

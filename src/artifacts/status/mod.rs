//! Working tree status
//!
//! Classifies every path in the union of working tree, index and head commit
//! into exactly one status, by comparing the three payloads pairwise.
//!
//! - `file_status`: the status labels and their rendering
//! - `inspector`: the classification itself

pub mod file_status;
pub mod inspector;

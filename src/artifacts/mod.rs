//! Core data structures and algorithms
//!
//! - `names`: lexical validation of file and branch names
//! - `objects`: blobs, commits and their ids
//! - `graph`: tips, membership and common-ancestor queries over branch sets
//! - `index`: the staging index
//! - `status`: the nine-way working/index/head classifier
//! - `removal`: the `rm` safety cascade
//! - `checkout`: switch safety analysis and planning
//! - `merge`: three-way merge analysis with whole-file conflict detection

pub mod checkout;
pub mod graph;
pub mod index;
pub mod merge;
pub mod names;
pub mod objects;
pub mod removal;
pub mod status;

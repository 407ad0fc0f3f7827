//! Snapshot object types
//!
//! The repository stores two kinds of object:
//!
//! - `blob`: the byte payload of one file snapshot, immutable once written
//! - `commit`: a numbered, messaged mapping of file names to blob ids
//!
//! There is no content addressing: blob and commit ids are plain sequential
//! integers handed out by the repository state.

pub mod blob;
pub mod commit;

//! Command implementations
//!
//! Every user-facing command is an `impl Repository` block in its own file
//! under `porcelain`. Commands are thin: acquire the lock, load the state
//! snapshot, drive the engines in `artifacts`, write the result back
//! atomically through the store.

pub mod porcelain;

//! User-facing commands
//!
//! - `init`: create the repository
//! - `add`: stage files into the index
//! - `commit`: record the index as a new commit
//! - `rm`: remove files, guarded by the safety cascade
//! - `status`: classify every path against working/index/head
//! - `log`: list the current branch's commits, tip first
//! - `show`: print a file as of a commit or from the index
//! - `branch`: list, create or delete branches
//! - `checkout`: switch branches, preserving local changes
//! - `merge`: already-up-to-date / fast-forward / three-way merge

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod rm;
pub mod show;
pub mod status;

//! Commits: numbered, messaged file snapshots.

use crate::artifacts::names::FileName;
use crate::artifacts::objects::blob::BlobId;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Commit ids form the gapless sequence `0, 1, 2, …` across the whole
/// repository and are never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, new,
)]
#[serde(transparent)]
pub struct CommitId(u64);

impl CommitId {
    /// Parse a decimal commit id. Rejects signs and non-digit characters,
    /// which `u64::from_str` would wave through.
    pub fn try_parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        raw.parse::<u64>().ok().map(Self)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A commit is the full set of tracked files at commit time, plus a message.
/// Created by `commit` or `merge`, then never modified or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct Commit {
    id: CommitId,
    message: String,
    files: BTreeMap<FileName, BlobId>,
}

impl Commit {
    pub fn id(&self) -> CommitId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn files(&self) -> &BTreeMap<FileName, BlobId> {
        &self.files
    }

    pub fn file(&self, name: &FileName) -> Option<BlobId> {
        self.files.get(name).copied()
    }

    pub fn contains(&self, name: &FileName) -> bool {
        self.files.contains_key(name)
    }
}

//! The staging index
//!
//! The index is the file set the next commit will capture: a mapping from
//! file name to blob id. It is mutated by `add`, `rm`, `commit -a`,
//! `checkout` and `merge`, and persisted as part of the repository state
//! document.

use crate::artifacts::names::FileName;
use crate::artifacts::objects::blob::BlobId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index {
    entries: BTreeMap<FileName, BlobId>,
}

impl Index {
    pub fn entries(&self) -> &BTreeMap<FileName, BlobId> {
        &self.entries
    }

    pub fn get(&self, name: &FileName) -> Option<BlobId> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &FileName) -> bool {
        self.entries.contains_key(name)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &FileName> {
        self.entries.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stage a blob under a name, replacing any previous entry.
    pub fn put(&mut self, name: FileName, blob: BlobId) {
        self.entries.insert(name, blob);
    }

    /// Drop a name from the index. Removing an absent name is a no-op.
    pub fn delete(&mut self, name: &FileName) -> Option<BlobId> {
        self.entries.remove(name)
    }

    /// Replace the whole entry set, used by checkout's switch plan.
    pub fn replace(&mut self, entries: BTreeMap<FileName, BlobId>) {
        self.entries = entries;
    }
}

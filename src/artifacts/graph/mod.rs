//! Commit graph queries
//!
//! There are no parent pointers in this model: ancestry is entirely encoded
//! in branch membership. Every branch carries the set of commit ids
//! reachable on it, the tip is the numeric maximum of that set, and the
//! lowest common ancestor of two branches is the largest id both sets
//! contain.

use crate::artifacts::names::BranchName;
use crate::artifacts::objects::commit::CommitId;
use std::collections::{BTreeMap, BTreeSet};

pub type CommitSet = BTreeSet<CommitId>;
pub type BranchMap = BTreeMap<BranchName, CommitSet>;

/// The tip of a commit set: its numeric maximum. `None` for a branch that
/// has no commits yet (only `trunk` before the first commit).
pub fn tip(commits: &CommitSet) -> Option<CommitId> {
    commits.iter().next_back().copied()
}

pub fn contains(commits: &CommitSet, id: CommitId) -> bool {
    commits.contains(&id)
}

/// The branch that owns a commit id, used to resolve merge-by-id targets.
///
/// After any branching a commit belongs to several branches, so the choice
/// needs a stable rule: prefer the branch whose tip is the given id,
/// otherwise the lexicographically smallest branch containing it.
pub fn owning_branch(branches: &BranchMap, id: CommitId) -> Option<&BranchName> {
    branches
        .iter()
        .find(|(_, commits)| tip(commits) == Some(id))
        .or_else(|| branches.iter().find(|(_, commits)| commits.contains(&id)))
        .map(|(name, _)| name)
}

/// The largest commit id present in both sets, scanning the first set from
/// its tip downwards. `None` only for histories with disjoint roots, which
/// cannot arise after init.
pub fn lowest_common_ancestor(a: &CommitSet, b: &CommitSet) -> Option<CommitId> {
    a.iter().rev().find(|id| b.contains(id)).copied()
}

/// Commit ids are dense, so the next id is the commit count.
pub fn next_commit_id(commit_count: usize) -> CommitId {
    CommitId::new(commit_count as u64)
}

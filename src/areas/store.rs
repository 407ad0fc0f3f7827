//! Persisted repository state
//!
//! The whole repository (branches, commits, index, current-branch pointer,
//! blob counter) is one serde document at `.legit/state.json`,
//! loaded once per command and written back atomically (temp file + rename).
//! That rename is the single commit point of every mutating command: a
//! command that fails part-way leaves at worst unreferenced blob files,
//! never a torn state.
//!
//! ## Locking
//!
//! Commands take an exclusive lock on `.legit/lock` for their whole
//! duration, so a second invocation blocks instead of reading a state it
//! might race with.

use crate::artifacts::graph;
use crate::artifacts::index::Index;
use crate::artifacts::names::{BranchName, FileName};
use crate::artifacts::objects::blob::BlobId;
use crate::artifacts::objects::commit::{Commit, CommitId};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// State directory name, directly under the repository root.
pub const STATE_DIR: &str = ".legit";

const STATE_FILE: &str = "state.json";
const STATE_SWAP_FILE: &str = "state.json.swap";
const LOCK_FILE: &str = "lock";
const OBJECTS_DIR: &str = "objects";

/// The in-memory snapshot of the repository.
///
/// Commands load one snapshot, mutate it through the operations below and
/// hand it back to [`Store::save`]. Nothing here touches the filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoState {
    current_branch: BranchName,
    branches: BTreeMap<BranchName, BTreeSet<CommitId>>,
    commits: Vec<Commit>,
    index: Index,
    blob_count: u64,
}

impl RepoState {
    fn initial() -> Self {
        let trunk = BranchName::default_branch();

        RepoState {
            current_branch: trunk.clone(),
            branches: BTreeMap::from([(trunk, BTreeSet::new())]),
            commits: Vec::new(),
            index: Index::default(),
            blob_count: 0,
        }
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.current_branch
    }

    pub fn branches(&self) -> &BTreeMap<BranchName, BTreeSet<CommitId>> {
        &self.branches
    }

    pub fn branch(&self, name: &BranchName) -> Option<&BTreeSet<CommitId>> {
        self.branches.get(name)
    }

    pub fn commit(&self, id: CommitId) -> Option<&Commit> {
        self.commits.get(id.as_u64() as usize)
    }

    pub fn has_commits(&self) -> bool {
        !self.commits.is_empty()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// The tip commit of the current branch.
    pub fn head_commit(&self) -> Option<&Commit> {
        let commits = self.branch(&self.current_branch)?;
        self.commit(graph::tip(commits)?)
    }

    pub fn next_commit_id(&self) -> CommitId {
        graph::next_commit_id(self.commits.len())
    }

    /// Hand out the next blob id. The counter only persists with a saved
    /// state, so ids allocated by a failed command are reused harmlessly.
    pub fn allocate_blob_id(&mut self) -> BlobId {
        let id = BlobId::new(self.blob_count);
        self.blob_count += 1;
        id
    }

    pub fn commit_write(&mut self, commit: Commit) -> anyhow::Result<()> {
        if commit.id() != self.next_commit_id() {
            anyhow::bail!(
                "commit id {} breaks the sequence (expected {})",
                commit.id(),
                self.next_commit_id()
            );
        }

        self.commits.push(commit);
        Ok(())
    }

    pub fn index_put(&mut self, name: FileName, blob: BlobId) {
        self.index.put(name, blob);
    }

    pub fn index_delete(&mut self, name: &FileName) {
        self.index.delete(name);
    }

    pub fn index_replace(&mut self, entries: BTreeMap<FileName, BlobId>) {
        self.index.replace(entries);
    }

    /// Create a branch inheriting `from`'s commit set by value.
    pub fn branch_add(&mut self, name: BranchName, from: &BranchName) -> anyhow::Result<()> {
        if self.branches.contains_key(&name) {
            anyhow::bail!("branch '{}' already exists", name);
        }

        let commits = self
            .branch(from)
            .ok_or_else(|| anyhow::anyhow!("branch '{}' doesn't exist", from))?
            .clone();
        self.branches.insert(name, commits);

        Ok(())
    }

    pub fn branch_delete(&mut self, name: &BranchName) -> anyhow::Result<()> {
        self.branches
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| anyhow::anyhow!("branch '{}' doesn't exist", name))
    }

    pub fn branch_record_commit(
        &mut self,
        branch: &BranchName,
        id: CommitId,
    ) -> anyhow::Result<()> {
        self.branches
            .get_mut(branch)
            .ok_or_else(|| anyhow::anyhow!("branch '{}' doesn't exist", branch))?
            .insert(id);

        Ok(())
    }

    /// Add every id in `ids` to a branch's set. Branch sets only ever grow.
    pub fn branch_union(
        &mut self,
        branch: &BranchName,
        ids: &BTreeSet<CommitId>,
    ) -> anyhow::Result<()> {
        self.branches
            .get_mut(branch)
            .ok_or_else(|| anyhow::anyhow!("branch '{}' doesn't exist", branch))?
            .extend(ids.iter().copied());

        Ok(())
    }

    pub fn current_branch_set(&mut self, name: BranchName) -> anyhow::Result<()> {
        if !self.branches.contains_key(&name) {
            anyhow::bail!("branch '{}' doesn't exist", name);
        }

        self.current_branch = name;
        Ok(())
    }
}

/// Owns the `.legit` directory: the state document, the lock file and the
/// location of the objects directory.
#[derive(Debug, Clone)]
pub struct Store {
    path: Box<Path>,
}

impl Store {
    pub fn new(repo_root: &Path) -> Self {
        Store {
            path: repo_root.join(STATE_DIR).into_boxed_path(),
        }
    }

    pub fn objects_path(&self) -> PathBuf {
        self.path.join(OBJECTS_DIR)
    }

    fn state_path(&self) -> PathBuf {
        self.path.join(STATE_FILE)
    }

    pub fn is_initialized(&self) -> bool {
        self.state_path().is_file()
    }

    /// Create the state directory and the initial state. Fails when the
    /// repository already exists.
    pub fn init(&self) -> anyhow::Result<RepoState> {
        if self.path.exists() {
            anyhow::bail!("{} already exists", STATE_DIR);
        }

        std::fs::create_dir_all(self.objects_path())
            .with_context(|| format!("failed to create {}", self.path.display()))?;

        let state = RepoState::initial();
        self.save(&state)?;

        Ok(state)
    }

    /// Take the exclusive command lock. Also the initialization gate for
    /// every command except init.
    pub fn lock(&self) -> anyhow::Result<StateLock> {
        if !self.is_initialized() {
            anyhow::bail!("repository not initialized - run 'legit init' first");
        }

        StateLock::acquire(&self.path.join(LOCK_FILE))
    }

    pub fn load(&self) -> anyhow::Result<RepoState> {
        if !self.is_initialized() {
            anyhow::bail!("repository not initialized - run 'legit init' first");
        }

        let path = self.state_path();
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let state = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        Ok(state)
    }

    /// Atomic write-back: serialize to a sibling swap file, then rename over
    /// the state document.
    pub fn save(&self, state: &RepoState) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(state).context("failed to serialize state")?;

        let swap_path = self.path.join(STATE_SWAP_FILE);
        std::fs::write(&swap_path, raw)
            .with_context(|| format!("failed to write {}", swap_path.display()))?;
        std::fs::rename(&swap_path, self.state_path())
            .with_context(|| format!("failed to swap in {}", swap_path.display()))?;

        Ok(())
    }
}

/// Exclusive advisory lock on the repository, held for a command's lifetime.
pub struct StateLock {
    _guard: file_guard::FileGuard<Box<File>>,
}

impl StateLock {
    fn acquire(path: &Path) -> anyhow::Result<Self> {
        let file = Box::new(
            OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(path)
                .with_context(|| format!("failed to open lock file {}", path.display()))?,
        );

        let guard = file_guard::lock(file, file_guard::Lock::Exclusive, 0, 1)
            .with_context(|| format!("failed to lock {}", path.display()))?;

        Ok(StateLock { _guard: guard })
    }
}

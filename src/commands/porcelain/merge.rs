use crate::areas::repository::Repository;
use crate::areas::store::RepoState;
use crate::artifacts::graph::{self, CommitSet};
use crate::artifacts::merge;
use crate::artifacts::names::BranchName;
use crate::artifacts::objects::commit::{Commit, CommitId};
use std::io::Write;

impl Repository {
    pub fn merge(&self, target: &str, message: &str) -> anyhow::Result<()> {
        let _lock = self.store().lock()?;
        let mut state = self.store().load()?;

        if !state.has_commits() {
            anyhow::bail!("this command can not be run until after the first commit");
        }
        if message.is_empty() {
            anyhow::bail!("empty commit message");
        }

        let dest_commits = self.resolve_target(&state, target)?;

        let current = state.current_branch().clone();
        let source_commits = state
            .branch(&current)
            .ok_or_else(|| anyhow::anyhow!("branch '{}' doesn't exist", current))?
            .clone();
        let source_tip = graph::tip(&source_commits)
            .ok_or_else(|| anyhow::anyhow!("branch '{}' has no commits", current))?;
        let dest_tip = graph::tip(&dest_commits)
            .ok_or_else(|| anyhow::anyhow!("merge target has no commits"))?;

        if source_commits.contains(&dest_tip) {
            writeln!(self.writer(), "Already up to date")?;
            return Ok(());
        }

        if dest_commits.contains(&source_tip) {
            return self.fast_forward(&mut state, &current, &dest_commits, dest_tip);
        }

        self.three_way(&mut state, &current, &source_commits, &dest_commits, message)
    }

    /// The target is a branch name first; failing that, a commit id whose
    /// owning branch becomes the merge source.
    fn resolve_target(&self, state: &RepoState, target: &str) -> anyhow::Result<CommitSet> {
        if let Ok(name) = BranchName::try_parse(target)
            && let Some(commits) = state.branch(&name)
        {
            return Ok(commits.clone());
        }

        if let Some(id) = CommitId::try_parse(target) {
            if state.commit(id).is_none() {
                anyhow::bail!("unknown commit '{}'", target);
            }

            let owner = graph::owning_branch(state.branches(), id)
                .ok_or_else(|| anyhow::anyhow!("commit {} is not on any branch", id))?;
            let commits = state
                .branch(owner)
                .ok_or_else(|| anyhow::anyhow!("branch '{}' doesn't exist", owner))?;

            return Ok(commits.clone());
        }

        anyhow::bail!("unknown branch '{}'", target);
    }

    /// The current tip is an ancestor of the target: adopt the target's
    /// history and snapshot, no commit created.
    fn fast_forward(
        &self,
        state: &mut RepoState,
        current: &BranchName,
        dest_commits: &CommitSet,
        dest_tip: CommitId,
    ) -> anyhow::Result<()> {
        let dest_commit = state
            .commit(dest_tip)
            .ok_or_else(|| anyhow::anyhow!("commit {} missing from the store", dest_tip))?;
        let files = self.resolve_commit(dest_commit)?;

        for (name, blob) in &files {
            self.workspace().write_file(name, &blob.data)?;
            state.index_put(name.clone(), blob.id);
        }

        state.branch_union(current, dest_commits)?;
        self.store().save(state)?;

        writeln!(self.writer(), "Fast-forward: no commit created")?;

        Ok(())
    }

    fn three_way(
        &self,
        state: &mut RepoState,
        current: &BranchName,
        source_commits: &CommitSet,
        dest_commits: &CommitSet,
        message: &str,
    ) -> anyhow::Result<()> {
        let base_id = graph::lowest_common_ancestor(source_commits, dest_commits)
            .ok_or_else(|| anyhow::anyhow!("no common ancestor"))?;

        let resolve = |id: CommitId| {
            let commit = state
                .commit(id)
                .ok_or_else(|| anyhow::anyhow!("commit {} missing from the store", id))?;
            self.resolve_commit(commit)
        };

        let base = resolve(base_id)?;
        let ours = resolve(
            graph::tip(source_commits)
                .ok_or_else(|| anyhow::anyhow!("branch '{}' has no commits", current))?,
        )?;
        let theirs = resolve(
            graph::tip(dest_commits).ok_or_else(|| anyhow::anyhow!("merge target has no commits"))?,
        )?;

        let files = merge::merge_tips(&base, &ours, &theirs)?;

        let id = state.next_commit_id();
        state.commit_write(Commit::new(id, message.to_string(), files.clone()))?;
        state.branch_record_commit(current, id)?;
        state.branch_union(current, dest_commits)?;

        for (name, blob_id) in &files {
            let data = self.database().read_blob(*blob_id)?;
            self.workspace().write_file(name, &data)?;
            state.index_put(name.clone(), *blob_id);
        }

        self.store().save(state)?;
        writeln!(self.writer(), "Committed as commit {}", id)?;

        Ok(())
    }
}

use crate::areas::repository::Repository;
use crate::areas::store::RepoState;
use crate::artifacts::graph;
use crate::artifacts::names::BranchName;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn branch(&self, create: Option<&str>, delete: Option<&str>) -> anyhow::Result<()> {
        let _lock = self.store().lock()?;
        let mut state = self.store().load()?;

        if !state.has_commits() {
            anyhow::bail!("this command can not be run until after the first commit");
        }

        if let Some(name) = delete {
            return self.delete_branch(&mut state, name);
        }

        match create {
            Some(name) => {
                let name = BranchName::try_parse(name)?;
                if state.branch(&name).is_some() {
                    anyhow::bail!("branch '{}' already exists", name);
                }

                let current = state.current_branch().clone();
                state.branch_add(name, &current)?;

                self.store().save(&state)
            }
            None => {
                for name in state.branches().keys() {
                    let line = if name == state.current_branch() {
                        name.as_str().green()
                    } else {
                        name.as_str().normal()
                    };
                    writeln!(self.writer(), "{}", line)?;
                }

                Ok(())
            }
        }
    }

    /// Deletion is refused for `trunk`, for the current branch, and for any
    /// branch whose tip the current branch has not merged.
    fn delete_branch(&self, state: &mut RepoState, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name)?;

        let Some(commits) = state.branch(&name) else {
            anyhow::bail!("branch '{}' doesn't exist", name);
        };

        if name.is_default_branch() {
            anyhow::bail!("can not delete branch '{}'", name);
        }

        if &name == state.current_branch() {
            anyhow::bail!("can not delete the current branch '{}'", name);
        }

        let tip = graph::tip(commits)
            .ok_or_else(|| anyhow::anyhow!("branch '{}' has no commits", name))?;
        let merged = state
            .branch(state.current_branch())
            .is_some_and(|current| current.contains(&tip));
        if !merged {
            anyhow::bail!("branch '{}' has unmerged changes", name);
        }

        state.branch_delete(&name)?;
        self.store().save(state)?;

        writeln!(self.writer(), "Deleted branch '{}'", name)?;

        Ok(())
    }
}

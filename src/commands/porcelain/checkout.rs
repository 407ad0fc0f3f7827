use crate::areas::repository::Repository;
use crate::artifacts::checkout::switch::SwitchPlan;
use crate::artifacts::graph;
use crate::artifacts::names::{BranchName, FileName};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    pub fn checkout(&self, target: &str) -> anyhow::Result<()> {
        let _lock = self.store().lock()?;
        let mut state = self.store().load()?;

        if !state.has_commits() {
            anyhow::bail!("this command can not be run until after the first commit");
        }

        let Ok(target) = BranchName::try_parse(target) else {
            anyhow::bail!("unknown branch '{}'", target);
        };
        let Some(dest_commits) = state.branch(&target) else {
            anyhow::bail!("unknown branch '{}'", target);
        };

        if &target == state.current_branch() {
            writeln!(self.writer(), "Already on '{}'", target)?;
            return Ok(());
        }

        let source_commit = state
            .head_commit()
            .ok_or_else(|| anyhow::anyhow!("branch '{}' has no commits", state.current_branch()))?;
        let dest_tip = graph::tip(dest_commits)
            .ok_or_else(|| anyhow::anyhow!("branch '{}' has no commits", target))?;
        let dest_commit = state
            .commit(dest_tip)
            .ok_or_else(|| anyhow::anyhow!("commit {} missing from the store", dest_tip))?;

        let source = self.resolve_commit(source_commit)?;
        let destination = self.resolve_commit(dest_commit)?;
        let index = self.database().resolve_files(state.index().entries())?;
        let working = self.working_payloads()?;

        let plan = SwitchPlan::prepare(&source, &destination, &working, &index)?;

        for name in plan.working_deletes() {
            self.workspace().remove_file(name)?;
        }
        for (name, data) in plan.working_writes() {
            self.workspace().write_file(name, data)?;
        }

        state.index_replace(plan.into_new_index());
        state.current_branch_set(target.clone())?;
        self.store().save(&state)?;

        writeln!(self.writer(), "Switched to branch '{}'", target)?;

        Ok(())
    }

    fn working_payloads(&self) -> anyhow::Result<BTreeMap<FileName, Bytes>> {
        let mut payloads = BTreeMap::new();

        for name in self.workspace().list_files()? {
            let data = self.workspace().read_file(&name)?;
            payloads.insert(name, data);
        }

        Ok(payloads)
    }
}

use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn log(&self) -> anyhow::Result<()> {
        let _lock = self.store().lock()?;
        let state = self.store().load()?;

        let commits = state
            .branch(state.current_branch())
            .ok_or_else(|| anyhow::anyhow!("branch '{}' doesn't exist", state.current_branch()))?;

        // tip first
        for id in commits.iter().rev() {
            let commit = state
                .commit(*id)
                .ok_or_else(|| anyhow::anyhow!("commit {} missing from the store", id))?;

            writeln!(self.writer(), "{} {}", commit.id(), commit.message())?;
        }

        Ok(())
    }
}

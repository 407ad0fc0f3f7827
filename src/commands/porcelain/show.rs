use crate::areas::repository::Repository;
use crate::artifacts::names::FileName;
use crate::artifacts::objects::commit::CommitId;
use std::io::Write;

impl Repository {
    /// `show <commit>:<file>`; an empty commit part reads from the index.
    pub fn show(&self, target: &str) -> anyhow::Result<()> {
        let _lock = self.store().lock()?;
        let state = self.store().load()?;

        let Some((commit_part, file_part)) = target.split_once(':') else {
            anyhow::bail!("invalid object '{}'", target);
        };

        let name = FileName::try_parse(file_part)?;

        let blob_id = if commit_part.is_empty() {
            state
                .index()
                .get(&name)
                .ok_or_else(|| anyhow::anyhow!("'{}' not found in index", name))?
        } else {
            let commit = CommitId::try_parse(commit_part)
                .and_then(|id| state.commit(id))
                .ok_or_else(|| anyhow::anyhow!("unknown commit '{}'", commit_part))?;

            commit
                .file(&name)
                .ok_or_else(|| anyhow::anyhow!("'{}' not found in commit {}", name, commit.id()))?
        };

        let data = self.database().read_blob(blob_id)?;
        self.writer().write_all(&data)?;

        Ok(())
    }
}

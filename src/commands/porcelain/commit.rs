use crate::areas::repository::Repository;
use crate::areas::store::RepoState;
use crate::artifacts::names::FileName;
use crate::artifacts::objects::commit::Commit;
use std::io::Write;

impl Repository {
    pub fn commit(&self, message: &str, refresh_from_working: bool) -> anyhow::Result<()> {
        if message.is_empty() {
            anyhow::bail!("empty commit message");
        }

        let _lock = self.store().lock()?;
        let mut state = self.store().load()?;

        if refresh_from_working {
            self.refresh_index(&mut state)?;
        }

        if !self.commit_required(&state)? {
            // a -a refresh is part of the operation and persists either way
            self.store().save(&state)?;
            writeln!(self.writer(), "nothing to commit")?;
            return Ok(());
        }

        let id = state.next_commit_id();
        let files = state.index().entries().clone();
        state.commit_write(Commit::new(id, message.to_string(), files))?;

        let current = state.current_branch().clone();
        state.branch_record_commit(&current, id)?;

        self.store().save(&state)?;
        writeln!(self.writer(), "Committed as commit {}", id)?;

        Ok(())
    }

    /// The `-a` pass: every name already in the index takes its working-tree
    /// contents, or leaves the index when the working file is gone.
    fn refresh_index(&self, state: &mut RepoState) -> anyhow::Result<()> {
        let names: Vec<FileName> = state.index().file_names().cloned().collect();

        for name in names {
            match self.workspace().try_read(&name)? {
                Some(data) => {
                    let unchanged = state
                        .index()
                        .get(&name)
                        .map(|id| self.database().read_blob(id))
                        .transpose()?
                        .is_some_and(|existing| existing == data);
                    if unchanged {
                        continue;
                    }

                    let id = state.allocate_blob_id();
                    self.database().write_blob(id, &data)?;
                    state.index_put(name, id);
                }
                None => {
                    state.index_delete(&name);
                }
            }
        }

        Ok(())
    }

    /// A commit is required unless the index matches the head commit by
    /// content, or there is no history and nothing staged.
    fn commit_required(&self, state: &RepoState) -> anyhow::Result<bool> {
        let Some(head) = state.head_commit() else {
            return Ok(!state.index().is_empty());
        };

        if head.files().len() != state.index().entries().len() {
            return Ok(true);
        }

        for (name, head_id) in head.files() {
            let Some(index_id) = state.index().get(name) else {
                return Ok(true);
            };

            if index_id == *head_id {
                continue;
            }

            // distinct blob ids can still hold identical bytes
            if self.database().read_blob(*head_id)? != self.database().read_blob(index_id)? {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

use crate::areas::repository::Repository;
use crate::artifacts::names::FileName;
use bytes::Bytes;

enum StageAction {
    /// Copy working-file contents into the index under this name.
    Stage(FileName, Bytes),
    /// The file is gone from the working tree: drop its index entry.
    Unstage(FileName),
}

impl Repository {
    pub fn add(&self, paths: &[String]) -> anyhow::Result<()> {
        let _lock = self.store().lock()?;
        let mut state = self.store().load()?;

        let mut names = Vec::with_capacity(paths.len());
        for path in paths {
            names.push(FileName::try_parse(path)?);
        }

        // vet everything before staging anything
        let mut actions = Vec::with_capacity(names.len());
        for name in names {
            if self.workspace().is_present(&name) {
                if !self.workspace().is_regular_file(&name) {
                    anyhow::bail!("'{}' is not a regular file", name);
                }

                let data = self.workspace().read_file(&name)?;
                actions.push(StageAction::Stage(name, data));
            } else if state.index().contains(&name) {
                actions.push(StageAction::Unstage(name));
            } else {
                anyhow::bail!("can not open '{}'", name);
            }
        }

        for action in actions {
            match action {
                StageAction::Stage(name, data) => {
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
                StageAction::Unstage(name) => {
                    state.index_delete(&name);
                }
            }
        }

        self.store().save(&state)
    }
}

use crate::areas::repository::Repository;
use crate::artifacts::names::FileName;
use crate::artifacts::removal::{self, RemoveMode};

impl Repository {
    pub fn rm(&self, paths: &[String], mode: RemoveMode) -> anyhow::Result<()> {
        let _lock = self.store().lock()?;
        let mut state = self.store().load()?;

        let mut requests = Vec::with_capacity(paths.len());
        for path in paths {
            let name = FileName::try_parse(path)?;
            let view = self.path_view(&state, &name)?;
            requests.push((name, view));
        }

        let plan = removal::plan(&requests, mode, state.head_commit().is_some())?;

        for name in &plan.delete_working {
            self.workspace().remove_file(name)?;
        }
        for name in &plan.unstage {
            state.index_delete(name);
        }

        self.store().save(&state)
    }
}

use crate::areas::repository::Repository;
use crate::artifacts::status::inspector;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let _lock = self.store().lock()?;
        let state = self.store().load()?;

        // the union of working tree, index and head commit, in name order
        let mut names = BTreeSet::new();
        names.extend(self.workspace().list_files()?);
        names.extend(state.index().file_names().cloned());
        if let Some(head) = state.head_commit() {
            names.extend(head.files().keys().cloned());
        }

        for name in names {
            let view = self.path_view(&state, &name)?;
            if let Some(status) = inspector::classify(&view) {
                writeln!(self.writer(), "{} - {}", name, status)?;
            }
        }

        Ok(())
    }
}

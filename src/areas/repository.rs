//! Repository facade
//!
//! Coordinates the storage areas and carries the output writer. Command
//! implementations live in `commands::porcelain`, one file per command, as
//! `impl Repository` blocks; this module only provides the shared plumbing
//! they build on.

use crate::areas::database::Database;
use crate::areas::store::{RepoState, Store};
use crate::areas::workspace::Workspace;
use crate::artifacts::names::FileName;
use crate::artifacts::objects::blob::StoredBlob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::status::inspector::PathView;
use std::cell::{RefCell, RefMut};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub struct Repository {
    /// Repository root path
    path: Box<Path>,
    /// Output writer (stdout in the binary, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Persisted state
    store: Store,
    /// Blob object files
    database: Database,
    /// Working directory
    workspace: Workspace,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;

        let store = Store::new(&path);
        let database = Database::new(store.objects_path().into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            store,
            database,
            workspace,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// One path's payloads across working tree, index and head commit.
    pub(crate) fn path_view(&self, state: &RepoState, name: &FileName) -> anyhow::Result<PathView> {
        let working = self.workspace.try_read(name)?;

        let index = state
            .index()
            .get(name)
            .map(|id| self.database.read_blob(id))
            .transpose()?;

        let head = state
            .head_commit()
            .and_then(|commit| commit.file(name))
            .map(|id| self.database.read_blob(id))
            .transpose()?;

        Ok(PathView::new(working, index, head))
    }

    /// A commit's file set with payloads loaded.
    pub(crate) fn resolve_commit(
        &self,
        commit: &Commit,
    ) -> anyhow::Result<BTreeMap<FileName, StoredBlob>> {
        self.database.resolve_files(commit.files())
    }
}

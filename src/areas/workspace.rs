//! Working directory operations
//!
//! The workspace is the repository root as the user sees it. Only flat
//! top-level regular files with lexically valid names are trackable, so the
//! scan never descends into directories and skips anything else (including
//! the `.legit` state directory, whose name is lexically invalid anyway).
//! The core only ever reads the workspace to classify state; writes happen
//! when checkout, merge or rm apply a vetted plan.

use crate::artifacts::names::FileName;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn file_path(&self, name: &FileName) -> PathBuf {
        self.path.join(name.as_str())
    }

    /// Every trackable file in the repository root, in name order.
    pub fn list_files(&self) -> anyhow::Result<Vec<FileName>> {
        let mut names = Vec::new();

        for entry in WalkDir::new(&self.path).min_depth(1).max_depth(1) {
            let entry = entry.with_context(|| {
                format!("failed to scan working directory {}", self.path.display())
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(raw) = entry.file_name().to_str()
                && let Ok(name) = FileName::try_parse(raw)
            {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    pub fn is_present(&self, name: &FileName) -> bool {
        self.file_path(name).exists()
    }

    pub fn is_regular_file(&self, name: &FileName) -> bool {
        self.file_path(name).is_file()
    }

    pub fn read_file(&self, name: &FileName) -> anyhow::Result<Bytes> {
        let path = self.file_path(name);
        let data = std::fs::read(&path)
            .with_context(|| format!("failed to read working file {}", path.display()))?;

        Ok(Bytes::from(data))
    }

    /// Read a working file, or `None` when there is no regular file under
    /// that name.
    pub fn try_read(&self, name: &FileName) -> anyhow::Result<Option<Bytes>> {
        if !self.is_regular_file(name) {
            return Ok(None);
        }

        self.read_file(name).map(Some)
    }

    pub fn write_file(&self, name: &FileName, data: &Bytes) -> anyhow::Result<()> {
        let path = self.file_path(name);
        std::fs::write(&path, data)
            .with_context(|| format!("failed to write working file {}", path.display()))?;

        Ok(())
    }

    /// Delete a working file. Deleting an absent file is a no-op.
    pub fn remove_file(&self, name: &FileName) -> anyhow::Result<()> {
        let path = self.file_path(name);

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove working file {}", path.display()))
            }
        }
    }
}

//! Blob object storage
//!
//! Blob payloads live outside the state document, one raw file per blob
//! under `.legit/objects/<id>`. A blob file referenced by the state is never
//! rewritten; files written by a command that later fails are unreferenced
//! and harmless.

use crate::artifacts::names::FileName;
use crate::artifacts::objects::blob::{BlobId, StoredBlob};
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    fn blob_path(&self, id: BlobId) -> PathBuf {
        self.path.join(id.to_string())
    }

    pub fn write_blob(&self, id: BlobId, data: &Bytes) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.path)
            .with_context(|| format!("failed to create objects directory {}", self.path.display()))?;

        let path = self.blob_path(id);
        std::fs::write(&path, data)
            .with_context(|| format!("failed to write blob {}", path.display()))?;

        Ok(())
    }

    pub fn read_blob(&self, id: BlobId) -> anyhow::Result<Bytes> {
        let path = self.blob_path(id);
        let data = std::fs::read(&path)
            .with_context(|| format!("failed to read blob {}", path.display()))?;

        Ok(Bytes::from(data))
    }

    pub fn load(&self, id: BlobId) -> anyhow::Result<StoredBlob> {
        Ok(StoredBlob::new(id, self.read_blob(id)?))
    }

    /// Resolve a commit or index file mapping into loaded blobs.
    pub fn resolve_files(
        &self,
        files: &BTreeMap<FileName, BlobId>,
    ) -> anyhow::Result<BTreeMap<FileName, StoredBlob>> {
        files
            .iter()
            .map(|(name, id)| Ok((name.clone(), self.load(*id)?)))
            .collect()
    }
}

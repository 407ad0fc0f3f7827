//! Status labels for tracked and untracked paths.

use colored::Colorize;
use std::fmt;

/// One path's status across working tree, index and head commit.
///
/// The twelve variants partition every combination of presence and payload
/// equality over the three file sets; see [`inspector::classify`] for the
/// mapping.
///
/// [`inspector::classify`]: super::inspector::classify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Untracked,
    AddedToIndex,
    AddedToIndexChanged,
    DeletedFromIndex,
    SameAsRepo,
    ChangesNotStaged,
    ChangesStaged,
    DifferentChangesStaged,
    AddedFileDeleted,
    FileDeleted,
    FileDeletedChangesStaged,
    FileDeletedDeletedFromIndex,
}

impl FileStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Untracked => "untracked",
            FileStatus::AddedToIndex => "added to index",
            FileStatus::AddedToIndexChanged => "added to index, file changed",
            FileStatus::DeletedFromIndex => "deleted from index",
            FileStatus::SameAsRepo => "same as repo",
            FileStatus::ChangesNotStaged => "file changed, changes not staged for commit",
            FileStatus::ChangesStaged => "file changed, changes staged for commit",
            FileStatus::DifferentChangesStaged => {
                "file changed, different changes staged for commit"
            }
            FileStatus::AddedFileDeleted => "added to index, file deleted",
            FileStatus::FileDeleted => "file deleted",
            FileStatus::FileDeletedChangesStaged => "file deleted, changes staged for commit",
            FileStatus::FileDeletedDeletedFromIndex => "file deleted, deleted from index",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // color only decorates; the label text is the contract
        let label = match self {
            FileStatus::SameAsRepo => self.label().normal(),
            FileStatus::AddedToIndex | FileStatus::ChangesStaged => self.label().green(),
            _ => self.label().red(),
        };

        write!(f, "{}", label)
    }
}

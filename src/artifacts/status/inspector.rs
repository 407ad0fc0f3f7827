//! Status classification logic
//!
//! Every path is viewed as a triple of optional payloads (working, index,
//! head) and classified by presence first, payload equality second. The
//! table is total: any path present somewhere receives exactly one status.

use crate::artifacts::objects::blob::payloads_equal;
use crate::artifacts::status::file_status::FileStatus;
use bytes::Bytes;
use derive_new::new;

/// One path's payloads across the three file sets. `None` means the path is
/// absent from that set.
#[derive(Debug, Clone, Default, new)]
pub struct PathView {
    pub working: Option<Bytes>,
    pub index: Option<Bytes>,
    pub head: Option<Bytes>,
}

/// Classify a path. Returns `None` only for the empty view, which cannot
/// occur when iterating the union of the three sets.
pub fn classify(view: &PathView) -> Option<FileStatus> {
    let working = view.working.as_ref();
    let index = view.index.as_ref();
    let head = view.head.as_ref();

    let status = match (working.is_some(), index.is_some(), head.is_some()) {
        (false, false, false) => return None,
        (true, false, false) => FileStatus::Untracked,
        (true, true, false) => {
            if payloads_equal(index, working) {
                FileStatus::AddedToIndex
            } else {
                FileStatus::AddedToIndexChanged
            }
        }
        (true, false, true) => FileStatus::DeletedFromIndex,
        (true, true, true) => match (payloads_equal(working, index), payloads_equal(index, head)) {
            (true, true) => FileStatus::SameAsRepo,
            (false, true) => FileStatus::ChangesNotStaged,
            (true, false) => FileStatus::ChangesStaged,
            (false, false) => FileStatus::DifferentChangesStaged,
        },
        (false, true, false) => FileStatus::AddedFileDeleted,
        (false, true, true) => {
            if payloads_equal(index, head) {
                FileStatus::FileDeleted
            } else {
                FileStatus::FileDeletedChangesStaged
            }
        }
        (false, false, true) => FileStatus::FileDeletedDeletedFromIndex,
    };

    Some(status)
}

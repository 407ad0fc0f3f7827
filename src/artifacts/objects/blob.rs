//! Blob identity, payloads and the byte-exact comparator.

use bytes::Bytes;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a stored blob: its file name under the objects directory.
///
/// Ids are allocated sequentially by the repository state. A blob file that
/// the state references is never rewritten.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, new,
)]
#[serde(transparent)]
pub struct BlobId(u64);

impl BlobId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A blob resolved from the object database: identity plus payload.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StoredBlob {
    pub id: BlobId,
    pub data: Bytes,
}

/// Byte-exact comparison of two optional payloads.
///
/// A missing file never equals a present one; two absences are equal. Every
/// "changed" predicate in the status, removal, checkout and merge engines
/// goes through here.
pub fn payloads_equal(a: Option<&Bytes>, b: Option<&Bytes>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

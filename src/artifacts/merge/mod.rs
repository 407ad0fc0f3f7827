//! Three-way merge analysis
//!
//! Merging is union-biased: relative to the common ancestor, the merged file
//! set takes every changed file from both tips and keeps everything else
//! from either tip. Conflicts are detected at whole-file granularity (a
//! file changed on both sides with different resulting payloads) and are
//! never auto-resolved; the merge is rejected instead. Deletions do not
//! propagate, which is the intended behavior of the snapshot model.
//!
//! The already-up-to-date and fast-forward cases are pure branch-set
//! questions and live with the command; this module owns the content
//! analysis.

use crate::artifacts::names::FileName;
use crate::artifacts::objects::blob::{BlobId, StoredBlob};
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Debug logging for merge analysis, enabled with the `debug_merge` feature.
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

/// Whole-file conflicts that abort a three-way merge.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MergeConflict {
    files: BTreeSet<FileName>,
}

impl MergeConflict {
    pub fn files(&self) -> &BTreeSet<FileName> {
        &self.files
    }
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "These files can not be merged:")?;

        let names = self
            .files
            .iter()
            .map(FileName::as_str)
            .collect::<Vec<_>>()
            .join("\n");

        write!(f, "{}", names)
    }
}

impl std::error::Error for MergeConflict {}

/// Files present in both the base and the tip whose payloads differ.
/// Files the tip added (absent from the base) are not "changes" here; the
/// union step picks them up unconditionally.
pub fn changed_since_base(
    base: &BTreeMap<FileName, StoredBlob>,
    tip: &BTreeMap<FileName, StoredBlob>,
) -> BTreeSet<FileName> {
    tip.iter()
        .filter(|(name, blob)| base.get(*name).is_some_and(|b| b.data != blob.data))
        .map(|(name, _)| name.clone())
        .collect()
}

/// Combine two tips relative to their common ancestor.
///
/// Returns the merged file set, or the conflicting names when both sides
/// changed a file to different payloads.
pub fn merge_tips(
    base: &BTreeMap<FileName, StoredBlob>,
    ours: &BTreeMap<FileName, StoredBlob>,
    theirs: &BTreeMap<FileName, StoredBlob>,
) -> Result<BTreeMap<FileName, BlobId>, MergeConflict> {
    let ours_changed = changed_since_base(base, ours);
    let theirs_changed = changed_since_base(base, theirs);

    debug_log!(
        "changed on ours: [{}], changed on theirs: [{}]",
        ours_changed.iter().map(FileName::as_str).collect::<Vec<_>>().join(", "),
        theirs_changed.iter().map(FileName::as_str).collect::<Vec<_>>().join(", ")
    );

    let conflicts: BTreeSet<FileName> = ours_changed
        .intersection(&theirs_changed)
        .filter(|name| {
            match (ours.get(*name), theirs.get(*name)) {
                (Some(a), Some(b)) => a.data != b.data,
                _ => false,
            }
        })
        .cloned()
        .collect();

    if !conflicts.is_empty() {
        debug_log!(
            "conflicting files: [{}]",
            conflicts.iter().map(FileName::as_str).collect::<Vec<_>>().join(", ")
        );
        return Err(MergeConflict::new(conflicts));
    }

    let mut files = BTreeMap::new();

    for name in &ours_changed {
        if let Some(blob) = ours.get(name) {
            files.insert(name.clone(), blob.id);
        }
    }
    for name in &theirs_changed {
        if let Some(blob) = theirs.get(name) {
            files.entry(name.clone()).or_insert(blob.id);
        }
    }
    for (name, blob) in ours {
        files.entry(name.clone()).or_insert(blob.id);
    }
    for (name, blob) in theirs {
        files.entry(name.clone()).or_insert(blob.id);
    }

    Ok(files)
}

//! Switch safety analysis and planning
//!
//! Per-path categories against the source tip S and destination tip D:
//!
//! - **edited-local**: present in S, but the working file or the index entry
//!   differs from S; absence counts as a difference, so a local deletion is
//!   an edit too
//! - **new-local**: present in the working tree or index, absent from S
//!
//! The switch is rejected when an edited-local path exists in D with a
//! payload different from S's, or when a new-local path exists in D at all.
//! Otherwise every local change is preserved byte-exactly across the switch:
//! preserved paths keep their pre-switch working and index state, all other
//! destination paths take D's blobs, and paths only the source tip carried
//! disappear.
//!
//! The preserved payloads live in this in-memory plan, never in scratch
//! directories, so nothing needs tearing down on any exit path.

use crate::artifacts::checkout::conflict::SwitchRejection;
use crate::artifacts::names::FileName;
use crate::artifacts::objects::blob::{BlobId, StoredBlob, payloads_equal};
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

/// Local state carried across the switch for one path. `None` preserves a
/// local deletion.
#[derive(Debug, Clone, Default)]
struct PreservedEntry {
    working: Option<Bytes>,
    index: Option<StoredBlob>,
}

/// A fully vetted branch switch: the working-tree writes and deletions to
/// apply and the index that replaces the current one.
#[derive(Debug, Default)]
pub struct SwitchPlan {
    working_writes: BTreeMap<FileName, Bytes>,
    working_deletes: BTreeSet<FileName>,
    new_index: BTreeMap<FileName, BlobId>,
}

impl SwitchPlan {
    /// Analyze a switch from `source` tip to `destination` tip given the
    /// current working tree and index payloads. Rejects the whole switch
    /// before planning anything if any local change would be overwritten.
    pub fn prepare(
        source: &BTreeMap<FileName, StoredBlob>,
        destination: &BTreeMap<FileName, StoredBlob>,
        working: &BTreeMap<FileName, Bytes>,
        index: &BTreeMap<FileName, StoredBlob>,
    ) -> Result<SwitchPlan, SwitchRejection> {
        let mut preserved: BTreeMap<FileName, PreservedEntry> = BTreeMap::new();
        let mut offenders = BTreeSet::new();

        let names: BTreeSet<&FileName> = source
            .keys()
            .chain(working.keys())
            .chain(index.keys())
            .collect();

        for name in names {
            let base = source.get(name);
            let working_payload = working.get(name);
            let index_entry = index.get(name);

            match base {
                Some(base) => {
                    let edited = !payloads_equal(working_payload, Some(&base.data))
                        || !payloads_equal(index_entry.map(|entry| &entry.data), Some(&base.data));
                    if !edited {
                        continue;
                    }

                    if let Some(dest) = destination.get(name)
                        && dest.data != base.data
                    {
                        offenders.insert(name.clone());
                    }
                }
                None => {
                    if destination.contains_key(name) {
                        offenders.insert(name.clone());
                    }
                }
            }

            preserved.insert(
                name.clone(),
                PreservedEntry {
                    working: working_payload.cloned(),
                    index: index_entry.cloned(),
                },
            );
        }

        if !offenders.is_empty() {
            return Err(SwitchRejection::new(offenders));
        }

        let mut plan = SwitchPlan::default();
        let names: BTreeSet<FileName> = source
            .keys()
            .chain(destination.keys())
            .chain(preserved.keys())
            .cloned()
            .collect();

        for name in names {
            if let Some(local) = preserved.get(&name) {
                match &local.working {
                    Some(payload) => {
                        plan.working_writes.insert(name.clone(), payload.clone());
                    }
                    None => {
                        plan.working_deletes.insert(name.clone());
                    }
                }
                if let Some(entry) = &local.index {
                    plan.new_index.insert(name, entry.id);
                }
            } else if let Some(dest) = destination.get(&name) {
                plan.working_writes.insert(name.clone(), dest.data.clone());
                plan.new_index.insert(name, dest.id);
            } else {
                // carried only by the source tip and untouched locally
                plan.working_deletes.insert(name);
            }
        }

        Ok(plan)
    }

    pub fn working_writes(&self) -> &BTreeMap<FileName, Bytes> {
        &self.working_writes
    }

    pub fn working_deletes(&self) -> &BTreeSet<FileName> {
        &self.working_deletes
    }

    pub fn new_index(&self) -> &BTreeMap<FileName, BlobId> {
        &self.new_index
    }

    pub fn into_new_index(self) -> BTreeMap<FileName, BlobId> {
        self.new_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn name(raw: &str) -> FileName {
        FileName::try_parse(raw).expect("valid test file name")
    }

    fn payload(raw: &str) -> Bytes {
        Bytes::copy_from_slice(raw.as_bytes())
    }

    fn blob(id: u64, raw: &str) -> StoredBlob {
        StoredBlob::new(BlobId::new(id), payload(raw))
    }

    fn tip(entries: &[(&str, u64, &str)]) -> BTreeMap<FileName, StoredBlob> {
        entries
            .iter()
            .map(|(n, id, data)| (name(n), blob(*id, data)))
            .collect()
    }

    fn working(entries: &[(&str, &str)]) -> BTreeMap<FileName, Bytes> {
        entries.iter().map(|(n, data)| (name(n), payload(data))).collect()
    }

    #[rstest]
    fn clean_switch_replaces_source_files_with_destination_files() {
        let source = tip(&[("a", 0, "1"), ("b", 1, "x")]);
        let destination = tip(&[("a", 0, "1"), ("c", 2, "y")]);
        let index = source.clone();
        let work = working(&[("a", "1"), ("b", "x")]);

        let plan = SwitchPlan::prepare(&source, &destination, &work, &index).expect("switch is safe");

        assert_eq!(
            plan.working_writes().keys().cloned().collect::<Vec<_>>(),
            vec![name("a"), name("c")]
        );
        assert_eq!(
            plan.working_deletes().iter().cloned().collect::<Vec<_>>(),
            vec![name("b")]
        );
        assert_eq!(
            plan.new_index().keys().cloned().collect::<Vec<_>>(),
            vec![name("a"), name("c")]
        );
    }

    #[rstest]
    fn local_edit_survives_when_destination_agrees_with_source() {
        let source = tip(&[("a", 0, "1")]);
        let destination = tip(&[("a", 0, "1"), ("c", 2, "y")]);
        let index = source.clone();
        let work = working(&[("a", "edited")]);

        let plan = SwitchPlan::prepare(&source, &destination, &work, &index).expect("switch is safe");

        assert_eq!(plan.working_writes().get(&name("a")), Some(&payload("edited")));
        assert_eq!(plan.new_index().get(&name("a")), Some(&BlobId::new(0)));
    }

    #[rstest]
    fn local_edit_clashing_with_destination_rejects_the_switch() {
        let source = tip(&[("a", 0, "1")]);
        let destination = tip(&[("a", 3, "2")]);
        let index = source.clone();
        let work = working(&[("a", "edited")]);

        let rejection = SwitchPlan::prepare(&source, &destination, &work, &index)
            .expect_err("destination would overwrite the edit");

        assert_eq!(
            rejection.offenders().iter().cloned().collect::<Vec<_>>(),
            vec![name("a")]
        );
        assert!(rejection.to_string().contains("would be overwritten by checkout"));
    }

    #[rstest]
    fn untracked_file_present_in_destination_rejects_the_switch() {
        let source = tip(&[("a", 0, "1")]);
        let destination = tip(&[("a", 0, "1"), ("c", 2, "y")]);
        let index = source.clone();
        let work = working(&[("a", "1"), ("c", "mine")]);

        let rejection = SwitchPlan::prepare(&source, &destination, &work, &index)
            .expect_err("destination carries the untracked name");

        assert_eq!(
            rejection.offenders().iter().cloned().collect::<Vec<_>>(),
            vec![name("c")]
        );
    }

    #[rstest]
    fn untracked_file_unknown_to_destination_is_preserved() {
        let source = tip(&[("a", 0, "1")]);
        let destination = tip(&[("a", 0, "1")]);
        let index = source.clone();
        let work = working(&[("a", "1"), ("mine", "keep")]);

        let plan = SwitchPlan::prepare(&source, &destination, &work, &index).expect("switch is safe");

        assert_eq!(plan.working_writes().get(&name("mine")), Some(&payload("keep")));
        assert!(!plan.new_index().contains_key(&name("mine")));
    }

    #[rstest]
    fn local_deletion_is_applied_again_after_the_switch() {
        let source = tip(&[("a", 0, "1"), ("b", 1, "x")]);
        // b unchanged between the tips, deleted locally from working and index
        let destination = tip(&[("a", 0, "1"), ("b", 1, "x")]);
        let index = tip(&[("a", 0, "1")]);
        let work = working(&[("a", "1")]);

        let plan = SwitchPlan::prepare(&source, &destination, &work, &index).expect("switch is safe");

        assert!(plan.working_deletes().contains(&name("b")));
        assert!(!plan.new_index().contains_key(&name("b")));
    }

    #[rstest]
    fn staged_only_edit_is_preserved_in_the_index() {
        let source = tip(&[("a", 0, "1")]);
        let destination = tip(&[("a", 0, "1"), ("c", 2, "y")]);
        let index = tip(&[("a", 5, "staged")]);
        let work = working(&[("a", "staged")]);

        let plan = SwitchPlan::prepare(&source, &destination, &work, &index).expect("switch is safe");

        assert_eq!(plan.new_index().get(&name("a")), Some(&BlobId::new(5)));
        assert_eq!(plan.working_writes().get(&name("a")), Some(&payload("staged")));
    }
}

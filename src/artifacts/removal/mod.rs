//! Removal planning for `rm`
//!
//! `rm` must refuse to destroy work: before anything is removed, every
//! requested file runs through a cascade of safety predicates built on the
//! same three-way payload comparison the status classifier uses. Which
//! predicates apply depends on the modifier flags, and all files are vetted
//! before any is touched.

use crate::artifacts::names::FileName;
use crate::artifacts::objects::blob::payloads_equal;
use crate::artifacts::status::inspector::PathView;
use bitflags::bitflags;

bitflags! {
    /// Modifier flags of `rm`, combinable in any order on the command line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RemoveMode: u8 {
        /// Remove only from the index, leaving the working file alone.
        const CACHED = 0b01;
        /// Skip every safety predicate except the tracked-at-all check.
        const FORCE = 0b10;
    }
}

impl RemoveMode {
    pub fn from_args(cached: bool, force: bool) -> Self {
        let mut mode = RemoveMode::empty();
        if cached {
            mode |= RemoveMode::CACHED;
        }
        if force {
            mode |= RemoveMode::FORCE;
        }
        mode
    }
}

/// The vetted outcome of a removal request.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RemovalPlan {
    /// Names to drop from the index.
    pub unstage: Vec<FileName>,
    /// Names to delete from the working tree (empty under `--cached`).
    pub delete_working: Vec<FileName>,
}

/// Run the safety cascade over every requested file and produce the plan.
///
/// Predicate order per file:
/// 1. a head commit exists and the file is not in the index (always applied)
/// 2. index differs from both working file and head (skipped by `--force`)
/// 3. working equals index but index differs from head (plain mode only)
/// 4. working file differs from head (plain mode only)
pub fn plan(
    requests: &[(FileName, PathView)],
    mode: RemoveMode,
    head_exists: bool,
) -> anyhow::Result<RemovalPlan> {
    let mut plan = RemovalPlan::default();

    for (name, view) in requests {
        let working = view.working.as_ref();
        let index = view.index.as_ref();
        let head = view.head.as_ref();

        if head_exists && index.is_none() {
            anyhow::bail!("'{}' is not in the git repository", name);
        }

        if !mode.contains(RemoveMode::FORCE) {
            if !payloads_equal(index, working) && !payloads_equal(index, head) {
                anyhow::bail!(
                    "'{}' in index is different to both the working file and the repository",
                    name
                );
            }

            if !mode.contains(RemoveMode::CACHED) {
                if payloads_equal(working, index) && !payloads_equal(index, head) {
                    anyhow::bail!("'{}' has staged changes in the index", name);
                }

                if working.is_some() && !payloads_equal(working, head) {
                    anyhow::bail!("'{}' in the repository is different to the working file", name);
                }
            }
        }

        plan.unstage.push(name.clone());
        if !mode.contains(RemoveMode::CACHED) {
            plan.delete_working.push(name.clone());
        }
    }

    Ok(plan)
}

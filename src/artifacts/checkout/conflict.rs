//! Switch rejection: the checkout-would-overwrite error value.

use crate::artifacts::names::FileName;
use derive_new::new;
use std::collections::BTreeSet;
use std::fmt;

/// Why a branch switch was refused: the local changes on these paths would
/// be overwritten by the destination tip. The whole switch is rejected, the
/// repository is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct SwitchRejection {
    offenders: BTreeSet<FileName>,
}

impl SwitchRejection {
    pub fn offenders(&self) -> &BTreeSet<FileName> {
        &self.offenders
    }
}

impl fmt::Display for SwitchRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Your changes to the following files would be overwritten by checkout:"
        )?;

        let names = self
            .offenders
            .iter()
            .map(FileName::as_str)
            .collect::<Vec<_>>()
            .join("\n");

        write!(f, "{}", names)
    }
}

impl std::error::Error for SwitchRejection {}

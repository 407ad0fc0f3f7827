//! Lexical validation for file and branch names.
//!
//! Both kinds of name share one rule: start with an alphanumeric character,
//! continue with alphanumerics, dots, underscores or dashes. There are no
//! directory separators because only flat top-level files are tracked.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NAME_REGEX: &str = "^[A-Za-z0-9][A-Za-z0-9._-]*$";

/// The branch created by init. It is the initial current branch and can
/// never be deleted.
pub const DEFAULT_BRANCH: &str = "trunk";

fn is_valid_name(name: &str) -> anyhow::Result<bool> {
    let re = regex::Regex::new(NAME_REGEX)
        .with_context(|| format!("invalid name regex: {NAME_REGEX}"))?;

    Ok(re.is_match(name))
}

/// A validated top-level file name.
///
/// Serde round-trips re-validate through [`FileName::try_parse`], so a
/// hand-edited state document cannot smuggle in an invalid name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileName(String);

impl FileName {
    pub fn try_parse(name: &str) -> anyhow::Result<Self> {
        if !is_valid_name(name)? {
            anyhow::bail!("invalid filename '{}'", name);
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FileName {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(&value)
    }
}

impl From<FileName> for String {
    fn from(name: FileName) -> Self {
        name.0
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated branch name. Same lexical rule as file names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: &str) -> anyhow::Result<Self> {
        if !is_valid_name(name)? {
            anyhow::bail!("invalid branch name '{}'", name);
        }

        Ok(Self(name.to_string()))
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    pub fn is_default_branch(&self) -> bool {
        self.0 == DEFAULT_BRANCH
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(&value)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

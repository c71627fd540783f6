//! Data handed to, and expected back from, the pack merge engine.
//!
//! The merge algorithm lives outside this crate; this module only guarantees its
//! inputs are well-formed quest files.

use crate::error::Result;
use crate::mapper::{from_snbt, strip_control_chars};
use crate::model::QuestFile;
use serde::Serialize;
use std::str::FromStr;

/// How to treat an incoming id that already exists in the target pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    #[default]
    Skip,
    MergeById,
    Rename,
    NewIds,
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "skip" => Ok(ConflictPolicy::Skip),
            "merge_by_id" => Ok(ConflictPolicy::MergeById),
            "rename" => Ok(ConflictPolicy::Rename),
            "new_ids" => Ok(ConflictPolicy::NewIds),
            other => Err(format!("unknown conflict policy '{other}'")),
        }
    }
}

/// What a merge did: ids added, ids renamed (old, new), and anything worth telling the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MergeSummary {
    pub added: Vec<String>,
    pub renamed: Vec<(String, String)>,
    pub warnings: Vec<String>,
}

impl MergeSummary {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.renamed.is_empty() && self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeInput {
    pub incoming: QuestFile,
    pub policy: ConflictPolicy,
}

impl MergeInput {
    /// Map foreign SNBT text into a quest file, tolerating stray control characters.
    pub fn from_snbt(text: &str, policy: ConflictPolicy) -> Result<Self> {
        let incoming = from_snbt(&strip_control_chars(text))?;
        Ok(MergeInput { incoming, policy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;

    #[test]
    fn policy_names() {
        assert_eq!("merge-by-id".parse(), Ok(ConflictPolicy::MergeById));
        assert_eq!("NEW_IDS".parse(), Ok(ConflictPolicy::NewIds));
        assert!("overwrite".parse::<ConflictPolicy>().is_err());
        assert_eq!(ConflictPolicy::default(), ConflictPolicy::Skip);
    }

    #[test]
    fn input_is_mapped_or_rejected() {
        let input = MergeInput::from_snbt("{id: \"other\u{0}\", chapters: []}", ConflictPolicy::Rename).unwrap();
        assert_eq!(input.incoming.id, "other");
        assert_eq!(input.policy, ConflictPolicy::Rename);

        let err = MergeInput::from_snbt("[]", ConflictPolicy::Skip).unwrap_err();
        assert!(matches!(err, FormatError::InvalidContent(_)));
    }

    #[test]
    fn empty_summary() {
        assert!(MergeSummary::default().is_empty());
    }
}

//! Independent validators over a `QuestFile`, plus schema checks on raw SNBT.
//!
//! Each validator is a plain function; none depends on another's output, so the
//! pipeline just concatenates their issues.

pub mod dependency_cycle;
pub mod duplicate_ids;
pub mod loot_weights;
pub mod required_fields;
pub mod schema;

pub use dependency_cycle::validate_dependency_cycles;
pub use duplicate_ids::validate_unique_ids;
pub use loot_weights::validate_loot_weights;
pub use required_fields::validate_required_fields;
pub use schema::validate_snbt_schema;

use crate::model::{QuestFile, ValidationIssue};
use tracing::{debug, warn};

pub type ValidatorFn = fn(&QuestFile) -> Vec<ValidationIssue>;

/// Reserved for checking task and reward item ids against an external item catalog.
/// No catalog is available to this crate, so it reports nothing.
pub fn validate_broken_references(_file: &QuestFile) -> Vec<ValidationIssue> {
    Vec::new()
}

#[derive(Debug, Clone)]
pub struct ValidationPipeline {
    validators: Vec<(&'static str, ValidatorFn)>,
}

impl ValidationPipeline {
    pub fn standard() -> Self {
        ValidationPipeline {
            validators: vec![
                ("required_fields", validate_required_fields as ValidatorFn),
                ("duplicate_ids", validate_unique_ids),
                ("dependency_cycles", validate_dependency_cycles),
                ("loot_weights", validate_loot_weights),
                ("broken_references", validate_broken_references),
            ],
        }
    }

    /// Drop the named validators. Unknown names are logged and ignored.
    pub fn without<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        for name in names {
            let name = name.as_ref();
            let before = self.validators.len();
            self.validators.retain(|(n, _)| *n != name);
            if self.validators.len() == before {
                warn!(name, "unknown validator in skip list");
            }
        }
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|(n, _)| *n).collect()
    }

    pub fn run(&self, file: &QuestFile) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (name, validator) in &self.validators {
            let found = validator(file);
            debug!(validator = *name, issues = found.len(), "validator finished");
            issues.extend(found);
        }
        issues
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Run every standard validator.
pub fn validate_quest_file(file: &QuestFile) -> Vec<ValidationIssue> {
    ValidationPipeline::standard().run(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, Dependency, LootTable, Quest};

    fn broken_file() -> QuestFile {
        QuestFile {
            id: "pack".into(),
            title: String::new(),
            chapters: vec![Chapter {
                id: "c".into(),
                title: "C".into(),
                quests: vec![
                    Quest {
                        id: "A".into(),
                        title: "A".into(),
                        dependencies: vec![Dependency::required("B")],
                        ..Default::default()
                    },
                    Quest {
                        id: "B".into(),
                        title: "B".into(),
                        dependencies: vec![Dependency::required("A")],
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }],
            loot_tables: vec![LootTable {
                id: "empty".into(),
                pools: vec![],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn pipeline_concatenates_in_order() {
        let issues = validate_quest_file(&broken_file());
        let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["questFile", "chapter/c/quests/A", "lootTables/empty"]);
    }

    #[test]
    fn skipped_validators_do_not_run() {
        let pipeline = ValidationPipeline::standard().without(&["dependency_cycles", "no_such_check"]);
        assert!(!pipeline.names().contains(&"dependency_cycles"));
        let issues = pipeline.run(&broken_file());
        assert!(issues.iter().all(|i| !i.path.starts_with("chapter/")));
    }

    #[test]
    fn broken_references_is_a_no_op() {
        assert!(validate_broken_references(&broken_file()).is_empty());
    }
}

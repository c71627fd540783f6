use crate::model::{QuestFile, ValidationIssue};
use std::collections::HashSet;

/// Ids must be unique within each collection of their own kind. Quest ids are
/// checked per chapter. Blank ids are left to the required-fields check.
pub fn validate_unique_ids(file: &QuestFile) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    report_duplicates(
        file.chapter_groups.iter().map(|g| g.id.as_str()),
        "chapterGroups",
        "chapter group",
        &mut issues,
    );
    report_duplicates(
        file.chapters.iter().map(|c| c.id.as_str()),
        "chapters",
        "chapter",
        &mut issues,
    );
    for chapter in &file.chapters {
        report_duplicates(
            chapter.quests.iter().map(|q| q.id.as_str()),
            &format!("chapters/{}/quests", chapter.id),
            "quest",
            &mut issues,
        );
    }
    report_duplicates(
        file.loot_tables.iter().map(|t| t.id.as_str()),
        "lootTables",
        "loot table",
        &mut issues,
    );

    issues
}

fn report_duplicates<'a>(
    ids: impl Iterator<Item = &'a str>,
    prefix: &str,
    kind: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in ids.filter(|id| !id.trim().is_empty()) {
        if !seen.insert(id) && reported.insert(id) {
            issues.push(ValidationIssue::error(
                format!("{prefix}/{id}"),
                format!("Duplicate {kind} id '{id}'"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, LootTable, Quest};

    #[test]
    fn reports_each_duplicated_id_once() {
        let quest = |id: &str| Quest {
            id: id.into(),
            ..Default::default()
        };
        let file = QuestFile {
            chapters: vec![
                Chapter {
                    id: "c".into(),
                    quests: vec![quest("q"), quest("q"), quest("q"), quest("r")],
                    ..Default::default()
                },
                Chapter {
                    id: "c".into(),
                    quests: vec![quest("r")],
                    ..Default::default()
                },
            ],
            loot_tables: vec![LootTable::default(), LootTable::default()],
            ..Default::default()
        };
        let issues = validate_unique_ids(&file);
        let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
        // blank loot table ids are not duplicates here
        assert_eq!(paths, vec!["chapters/c", "chapters/c/quests/q"]);
        assert_eq!(issues[1].message, "Duplicate quest id 'q'");
    }
}

use crate::model::{QuestFile, ValidationIssue};

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Missing ids are errors; missing chapter and quest titles only warn.
pub fn validate_required_fields(file: &QuestFile) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if is_blank(&file.id) {
        issues.push(ValidationIssue::error("questFile", "Quest file id is required"));
    }
    if is_blank(&file.title) {
        issues.push(ValidationIssue::error("questFile", "Quest file title is required"));
    }

    for chapter in &file.chapters {
        let path = format!("chapters/{}", chapter.id);
        if is_blank(&chapter.id) {
            issues.push(ValidationIssue::error(&path, "Chapter id is required"));
        }
        if is_blank(&chapter.title) {
            issues.push(ValidationIssue::warning(&path, "Chapter title is empty"));
        }

        for quest in &chapter.quests {
            let quest_path = format!("{path}/quests/{}", quest.id);
            if is_blank(&quest.id) {
                issues.push(ValidationIssue::error(&quest_path, "Quest id is required"));
            }
            if is_blank(&quest.title) {
                issues.push(ValidationIssue::warning(&quest_path, "Quest title is empty"));
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, Quest, Severity};

    #[test]
    fn complete_file_has_no_issues() {
        let file = QuestFile {
            id: "pack".into(),
            title: "Pack".into(),
            chapters: vec![Chapter {
                id: "c".into(),
                title: "Chapter".into(),
                quests: vec![Quest {
                    id: "q".into(),
                    title: "Quest".into(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(validate_required_fields(&file).is_empty());
    }

    #[test]
    fn flags_blank_fields_with_severity() {
        let file = QuestFile {
            id: "  ".into(),
            title: String::new(),
            chapters: vec![Chapter {
                id: "c".into(),
                title: String::new(),
                quests: vec![
                    Quest {
                        id: String::new(),
                        title: "Nameless".into(),
                        ..Default::default()
                    },
                    Quest {
                        id: "q".into(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }],
            ..Default::default()
        };
        let issues = validate_required_fields(&file);
        let found: Vec<(Severity, &str)> = issues
            .iter()
            .map(|i| (i.severity, i.path.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (Severity::Error, "questFile"),
                (Severity::Error, "questFile"),
                (Severity::Warning, "chapters/c"),
                (Severity::Error, "chapters/c/quests/"),
                (Severity::Warning, "chapters/c/quests/q"),
            ]
        );
    }
}

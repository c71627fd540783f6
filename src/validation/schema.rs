//! Structural checks on raw SNBT, run before (or instead of) mapping to a `QuestFile`.
//!
//! Paths are `$`-rooted, e.g. `$.chapters[0].quests[0].icon`.

use crate::model::ValidationIssue;
use crate::parser::parse_root_compound;
use crate::value::{Compound, Value};

pub fn validate_snbt_schema(text: &str) -> Vec<ValidationIssue> {
    let root = match parse_root_compound(text) {
        Ok(root) => root,
        Err(e) => {
            return vec![ValidationIssue::error("$", format!("SNBT parse error: {e}"))];
        }
    };

    let mut issues = Vec::new();

    for (path, group) in compound_list(&root, "chapter_groups", "$", &mut issues) {
        check_chapter_group(group, &path, &mut issues);
    }
    for (path, chapter) in compound_list(&root, "chapters", "$", &mut issues) {
        require_string_id(chapter, &path, &mut issues);
        for (quest_path, quest) in compound_list(chapter, "quests", &path, &mut issues) {
            require_string_id(quest, &quest_path, &mut issues);
            check_quest_icon(quest, &quest_path, &mut issues);
        }
    }
    for (path, table) in compound_list(&root, "loot_tables", "$", &mut issues) {
        for (pool_path, pool) in compound_list(table, "pools", &path, &mut issues) {
            for (entry_path, entry) in compound_list(pool, "entries", &pool_path, &mut issues) {
                if let Some(weight) = entry.get("weight")
                    && weight.as_f64().is_none()
                {
                    issues.push(ValidationIssue::error(
                        format!("{entry_path}.weight"),
                        format!("weight must be a number, found {}", weight.type_name()),
                    ));
                }
            }
        }
    }

    issues
}

fn check_chapter_group(group: &Compound, path: &str, issues: &mut Vec<ValidationIssue>) {
    let declared = ["chapter_ids", "chapters"]
        .iter()
        .find_map(|key| group.get(*key).map(|v| (*key, v)));
    match declared {
        None => issues.push(ValidationIssue::error(
            path,
            "chapter group must declare its chapters via 'chapter_ids' or 'chapters'",
        )),
        Some((key, value)) if value.as_list().is_none() => issues.push(ValidationIssue::error(
            format!("{path}.{key}"),
            format!("expected a list of chapter ids, found {}", value.type_name()),
        )),
        Some(_) => {}
    }
}

fn check_quest_icon(quest: &Compound, path: &str, issues: &mut Vec<ValidationIssue>) {
    match quest.get("icon") {
        None => issues.push(ValidationIssue::error(
            format!("{path}.icon"),
            "quest icon is required",
        )),
        Some(Value::Str(_) | Value::Compound(_)) => {}
        Some(other) => issues.push(ValidationIssue::error(
            format!("{path}.icon"),
            format!("quest icon must be an item id or compound, found {}", other.type_name()),
        )),
    }
}

fn require_string_id(map: &Compound, path: &str, issues: &mut Vec<ValidationIssue>) {
    match map.get("id") {
        Some(Value::Str(_)) => {}
        Some(other) => issues.push(ValidationIssue::error(
            format!("{path}.id"),
            format!("id must be a string, found {}", other.type_name()),
        )),
        None => issues.push(ValidationIssue::error(format!("{path}.id"), "id is required")),
    }
}

/// Compounds stored under `key`, paired with their paths. Wrong shapes are reported
/// and skipped; a missing key is an empty list.
fn compound_list<'a>(
    map: &'a Compound,
    key: &str,
    parent: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Vec<(String, &'a Compound)> {
    let path = format!("{parent}.{key}");
    let Some(value) = map.get(key) else {
        return Vec::new();
    };
    let Some(list) = value.as_list() else {
        issues.push(ValidationIssue::error(
            &path,
            format!("expected a list, found {}", value.type_name()),
        ));
        return Vec::new();
    };
    let mut out = Vec::new();
    for (i, item) in list.iter().enumerate() {
        let item_path = format!("{path}[{i}]");
        match item.as_compound() {
            Some(m) => out.push((item_path, m)),
            None => issues.push(ValidationIssue::error(
                item_path,
                format!("expected a compound, found {}", item.type_name()),
            )),
        }
    }
    out
}

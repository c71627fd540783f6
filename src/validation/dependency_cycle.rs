use crate::model::{Chapter, QuestFile, ValidationIssue};
use indexmap::IndexMap;
use std::collections::HashSet;

/// One ERROR per distinct dependency cycle, chapter by chapter.
///
/// Dependencies are chapter-scoped: targets outside the quest's own chapter are
/// not edges here.
pub fn validate_dependency_cycles(file: &QuestFile) -> Vec<ValidationIssue> {
    file.chapters.iter().flat_map(chapter_cycles).collect()
}

fn chapter_cycles(chapter: &Chapter) -> Vec<ValidationIssue> {
    let present: HashSet<&str> = chapter.quests.iter().map(|q| q.id.as_str()).collect();

    // quest -> the quests it depends on
    let mut adj: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for quest in &chapter.quests {
        let targets = adj.entry(quest.id.as_str()).or_default();
        for dep in &quest.dependencies {
            if present.contains(dep.target.as_str()) {
                targets.push(dep.target.as_str());
            }
        }
    }

    let mut issues = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut reported: HashSet<Vec<&str>> = HashSet::new();

    for &start in adj.keys() {
        if !visited.insert(start) {
            continue;
        }
        // (node, next neighbor index); the frames double as the current path
        let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
        let mut on_stack: HashSet<&str> = HashSet::from([start]);

        while let Some(top) = stack.last_mut() {
            let node = top.0;
            let Some(&next) = adj.get(node).and_then(|n| n.get(top.1)) else {
                stack.pop();
                on_stack.remove(node);
                continue;
            };
            top.1 += 1;

            if on_stack.contains(next) {
                let from = stack.iter().position(|(n, _)| *n == next).unwrap_or(0);
                let mut cycle: Vec<&str> = stack[from..].iter().map(|(n, _)| *n).collect();
                cycle.push(next);
                if reported.insert(cycle_key(&cycle)) {
                    issues.push(ValidationIssue::error(
                        format!("chapter/{}/quests/{}", chapter.id, cycle[0]),
                        format!("Dependency cycle detected: {}", cycle.join(" → ")),
                    ));
                }
            } else if visited.insert(next) {
                stack.push((next, 0));
                on_stack.insert(next);
            }
        }
    }

    issues
}

/// Rotation-independent identity of a closed cycle `[a, b, ..., a]`.
fn cycle_key<'a>(cycle: &[&'a str]) -> Vec<&'a str> {
    let ring = &cycle[..cycle.len().saturating_sub(1)];
    let start = ring
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| **id)
        .map(|(i, _)| i)
        .unwrap_or(0);
    ring[start..].iter().chain(&ring[..start]).copied().collect()
}

//! Numeric identifiers for one SNBT export.
use crate::model::QuestFile;
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    ChapterGroup,
    Chapter,
    Quest,
    LootTable,
}

/// Maps string ids to sequential `i64`s, starting at 1.
///
/// Scoped to a single export: build one from the snapshot being written and drop it
/// afterwards. Two registries built from differently ordered files will disagree.
#[derive(Debug)]
pub struct IdRegistry {
    ids: HashMap<IdKind, HashMap<String, i64>>,
    next: i64,
}

impl IdRegistry {
    pub fn new() -> Self {
        IdRegistry {
            ids: HashMap::new(),
            next: 1,
        }
    }

    /// Pre-register every id in `file`: chapter groups, chapters, each chapter's
    /// quests, then loot tables.
    ///
    /// Kinds are numbered in blocks: every chapter comes before the first quest,
    /// not interleaved with its own quests.
    pub fn for_file(file: &QuestFile) -> Self {
        let mut registry = IdRegistry::new();
        for group in &file.chapter_groups {
            registry.id_for(IdKind::ChapterGroup, &group.id);
        }
        for chapter in &file.chapters {
            registry.id_for(IdKind::Chapter, &chapter.id);
        }
        for chapter in &file.chapters {
            for quest in &chapter.quests {
                registry.id_for(IdKind::Quest, &quest.id);
            }
        }
        for table in &file.loot_tables {
            registry.id_for(IdKind::LootTable, &table.id);
        }
        registry
    }

    /// Memoized lookup; unseen ids get the next number.
    pub fn id_for(&mut self, kind: IdKind, id: &str) -> i64 {
        let by_id = self.ids.entry(kind).or_default();
        if let Some(&n) = by_id.get(id) {
            return n;
        }
        let n = self.next;
        self.next += 1;
        trace!(?kind, id, n, "registered id");
        by_id.insert(id.to_string(), n);
        n
    }

    pub fn len(&self) -> usize {
        self.ids.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.values().all(HashMap::is_empty)
    }
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use crate::model::{LootPool, QuestFile, ValidationIssue};

pub fn validate_loot_weights(file: &QuestFile) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for table in &file.loot_tables {
        let path = format!("lootTables/{}", table.id);
        if table.pools.is_empty() {
            issues.push(ValidationIssue::warning(&path, "Loot table has no pools"));
            continue;
        }

        for (i, pool) in table.pools.iter().enumerate() {
            let pool_path = format!("{path}/pools/{}", pool_label(pool, i));
            if pool.entries.is_empty() {
                issues.push(ValidationIssue::warning(&pool_path, "Loot pool has no entries"));
                continue;
            }

            for (j, entry) in pool.entries.iter().enumerate() {
                // also catches NaN
                if !(entry.weight > 0.0) {
                    issues.push(ValidationIssue::error(
                        format!("{pool_path}/entries/{j}"),
                        format!("Invalid weight {} for '{}': must be positive", entry.weight, entry.item.id),
                    ));
                }
            }

            let total: f64 = pool.entries.iter().map(|e| e.weight).sum();
            if !(total > 0.0) {
                issues.push(ValidationIssue::error(
                    &pool_path,
                    format!("Loot pool total weight must be positive, was {total}"),
                ));
            }
        }
    }

    issues
}

fn pool_label(pool: &LootPool, index: usize) -> String {
    if pool.name.trim().is_empty() {
        index.to_string()
    } else {
        pool.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemRef, LootEntry, LootTable, Severity};

    fn table(pools: Vec<LootPool>) -> QuestFile {
        QuestFile {
            loot_tables: vec![LootTable {
                id: "t".into(),
                pools,
            }],
            ..Default::default()
        }
    }

    fn pool(weights: &[f64]) -> LootPool {
        LootPool {
            name: "main".into(),
            rolls: 1,
            entries: weights
                .iter()
                .map(|w| LootEntry {
                    item: ItemRef::new("minecraft:stone", 1),
                    weight: *w,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn negative_and_zero_weights() {
        let issues = validate_loot_weights(&table(vec![pool(&[-1.0, 0.0])]));
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| i.severity == Severity::Error));
        assert_eq!(issues[0].path, "lootTables/t/pools/main/entries/0");
        assert_eq!(issues[1].path, "lootTables/t/pools/main/entries/1");
        assert_eq!(issues[2].path, "lootTables/t/pools/main");
        assert!(issues[2].message.contains("total weight"));
    }

    #[test]
    fn empty_pool_only_warns() {
        let issues = validate_loot_weights(&table(vec![pool(&[])]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].message.contains("no entries"));
    }

    #[test]
    fn table_without_pools_warns() {
        let issues = validate_loot_weights(&table(vec![]));
        assert_eq!(issues, vec![ValidationIssue::warning("lootTables/t", "Loot table has no pools")]);
    }

    #[test]
    fn large_weights_are_fine() {
        assert!(validate_loot_weights(&table(vec![pool(&[1e12, 0.5])])).is_empty());
    }

    #[test]
    fn unnamed_pool_uses_index() {
        let mut p = pool(&[0.0]);
        p.name.clear();
        let issues = validate_loot_weights(&table(vec![pool(&[1.0]), p]));
        assert_eq!(issues[0].path, "lootTables/t/pools/1/entries/0");
    }
}

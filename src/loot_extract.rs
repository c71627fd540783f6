//! Simplified item listing of a loot table, for pickers and previews.
//!
//! Never fails: malformed input degrades to the default icon and no items.

use crate::parser::parse_root_compound;
use crate::value::{Compound, Value};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_ICON: &str = "minecraft:chest";
pub const DEFAULT_WEIGHT: f64 = 1.0;
const MIN_COUNT: i64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootTableItem {
    pub id: String,
    pub count: i64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootTablePreview {
    pub icon: String,
    pub items: Vec<LootTableItem>,
}

impl Default for LootTablePreview {
    fn default() -> Self {
        LootTablePreview {
            icon: DEFAULT_ICON.to_string(),
            items: Vec::new(),
        }
    }
}

/// Read either the `items: [...]` shape or the legacy `pools: [{entries}]` shape.
/// The `items` array wins when it yields anything.
pub fn extract_loot_items(snbt: &str) -> LootTablePreview {
    let root = match parse_root_compound(snbt) {
        Ok(root) => root,
        Err(e) => {
            debug!(error = %e, "loot table preview fell back to defaults");
            return LootTablePreview::default();
        }
    };

    let icon = match root.get("icon") {
        Some(Value::Str(s)) if !s.is_empty() => s.clone(),
        Some(Value::Compound(m)) => string_field(m, &["id"]).unwrap_or_else(|| DEFAULT_ICON.to_string()),
        _ => DEFAULT_ICON.to_string(),
    };

    let mut items = items_array(&root);
    if items.is_empty() {
        items = legacy_pools(&root);
    }
    LootTablePreview { icon, items }
}

fn items_array(root: &Compound) -> Vec<LootTableItem> {
    let Some(list) = root.get("items").and_then(Value::as_list) else {
        return Vec::new();
    };
    list.iter()
        .filter_map(Value::as_compound)
        .filter_map(|m| {
            let id = string_field(m, &["id", "name"])?;
            Some(LootTableItem {
                id,
                count: clamp_count(m.get("count").and_then(Value::as_i64)),
                weight: weight_of(m),
            })
        })
        .collect()
}

fn legacy_pools(root: &Compound) -> Vec<LootTableItem> {
    let Some(pools) = root.get("pools").and_then(Value::as_list) else {
        return Vec::new();
    };
    let mut items = Vec::new();
    for pool in pools.iter().filter_map(Value::as_compound) {
        let Some(entries) = pool.get("entries").and_then(Value::as_list) else {
            continue;
        };
        for entry in entries.iter().filter_map(Value::as_compound) {
            if let Some(kind) = entry.get("type").and_then(Value::as_str)
                && !kind.contains("item")
            {
                continue;
            }
            let Some(id) = string_field(entry, &["name", "id"]) else {
                continue;
            };
            let count = entry
                .get("count")
                .and_then(Value::as_i64)
                .or_else(|| set_count(entry));
            items.push(LootTableItem {
                id,
                count: clamp_count(count),
                weight: weight_of(entry),
            });
        }
    }
    items
}

/// Count from a `functions` entry whose id ends in `set_count`.
fn set_count(entry: &Compound) -> Option<i64> {
    let functions = entry.get("functions").and_then(Value::as_list)?;
    functions.iter().filter_map(Value::as_compound).find_map(|f| {
        let id = string_field(f, &["function"])?;
        if !id.ends_with("set_count") {
            return None;
        }
        match f.get("count")? {
            // uniform ranges report their lower bound
            Value::Compound(range) => range.get("min").and_then(number_as_i64),
            other => number_as_i64(other),
        }
    })
}

fn number_as_i64(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
}

fn clamp_count(count: Option<i64>) -> i64 {
    count.unwrap_or(MIN_COUNT).max(MIN_COUNT)
}

fn weight_of(m: &Compound) -> f64 {
    m.get("weight")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_WEIGHT)
}

fn string_field(m: &Compound, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| m.get(*k).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

//! Value tree -> `QuestFile`, applying field-presence defaults.
//!
//! Lenient about missing fields (the validators report those) and strict about
//! shapes that cannot be mapped at all, such as `chapters` not being a list.

use crate::error::{FormatError, Result};
use crate::model::*;
use crate::value::{Compound, Value};
use tracing::warn;

pub fn quest_file_from_compound(root: &Compound) -> Result<QuestFile> {
    Ok(QuestFile {
        id: get_string(root, &["id"]).unwrap_or_default(),
        title: get_string(root, &["title"]).unwrap_or_default(),
        chapter_groups: map_compounds(root, "chapter_groups", "", parse_chapter_group)?,
        chapters: map_compounds(root, "chapters", "", parse_chapter)?,
        loot_tables: map_compounds(root, "loot_tables", "", parse_loot_table)?,
    })
}

fn parse_chapter_group(map: &Compound, path: &str) -> Result<ChapterGroup> {
    // older exports list the chapters under `chapters`
    let chapter_ids = match map.get("chapter_ids").or_else(|| map.get("chapters")) {
        Some(v) => string_list(v, &format!("{path}/chapter_ids"))?,
        None => Vec::new(),
    };
    Ok(ChapterGroup {
        id: get_string(map, &["id"]).unwrap_or_default(),
        title: get_string(map, &["title"]).unwrap_or_default(),
        icon: get_icon(map),
        chapter_ids,
        visibility: get_visibility(map, path),
    })
}

fn parse_chapter(map: &Compound, path: &str) -> Result<Chapter> {
    let background = match map.get("background") {
        Some(Value::Str(texture)) => Some(Background {
            texture: texture.clone(),
            alignment: None,
            repeat: None,
        }),
        Some(Value::Compound(bg)) => Some(Background {
            texture: get_string(bg, &["texture"]).unwrap_or_default(),
            alignment: get_string(bg, &["alignment"]),
            repeat: bg.get("repeat").and_then(Value::as_bool),
        }),
        Some(_) => return Err(FormatError::shape(format!("{path}/background"), "a texture or compound")),
        None => None,
    };
    Ok(Chapter {
        id: get_string(map, &["id"]).unwrap_or_default(),
        title: get_string(map, &["title"]).unwrap_or_default(),
        icon: get_icon(map),
        background,
        quests: map_compounds(map, "quests", path, parse_quest)?,
        visibility: get_visibility(map, path),
    })
}

fn parse_quest(map: &Compound, path: &str) -> Result<Quest> {
    let dependencies = match map.get("dependencies") {
        Some(v) => parse_dependencies(v, &format!("{path}/dependencies"))?,
        None => Vec::new(),
    };
    Ok(Quest {
        id: get_string(map, &["id"]).unwrap_or_default(),
        title: get_string(map, &["title"]).unwrap_or_default(),
        description: get_string(map, &["description"]).unwrap_or_default(),
        icon: get_icon(map),
        tasks: map_compounds(map, "tasks", path, parse_task)?,
        rewards: map_compounds(map, "rewards", path, parse_reward)?,
        dependencies,
        visibility: get_visibility(map, path),
    })
}

fn parse_task(map: &Compound, path: &str) -> Result<Task> {
    let task_type = get_string(map, &["type"])
        .ok_or_else(|| FormatError::shape(format!("{path}/type"), "a task type"))?;
    match task_type.as_str() {
        "item" => Ok(Task::Item {
            item: require_item(map, path)?,
            consume: get_flag(map, "consume"),
        }),
        "advancement" => Ok(Task::Advancement {
            advancement: get_string(map, &["advancement"]).unwrap_or_default(),
        }),
        "location" => Ok(Task::Location {
            dimension: get_string(map, &["dimension"])
                .unwrap_or_else(|| "minecraft:overworld".to_string()),
            x: get_i32(map, "x").unwrap_or(0),
            y: get_i32(map, "y").unwrap_or(0),
            z: get_i32(map, "z").unwrap_or(0),
            radius: get_i32(map, "radius").unwrap_or(0),
        }),
        other => Err(FormatError::shape(
            format!("{path}/type"),
            format!("item, advancement or location, found '{other}'"),
        )),
    }
}

fn parse_reward(map: &Compound, path: &str) -> Result<Reward> {
    let reward_type = get_string(map, &["type"])
        .ok_or_else(|| FormatError::shape(format!("{path}/type"), "a reward type"))?;
    let table = || get_string(map, &["table", "table_id"]).unwrap_or_default();
    let reward = match reward_type.as_str() {
        "item" => Reward::Item {
            item: require_item(map, path)?,
        },
        "loot_table" => Reward::LootTable { table: table() },
        "xp_levels" => Reward::XpLevels {
            levels: get_i32(map, "levels").unwrap_or(0),
        },
        "xp" => Reward::XpAmount {
            amount: get_i32(map, "amount").unwrap_or(0),
        },
        "command" => Reward::Command {
            command: get_string(map, &["command"]).unwrap_or_default(),
            run_as_server: get_flag(map, "run_as_server"),
        },
        "choice" => Reward::Choice { table: table() },
        "random" => Reward::Random { table: table() },
        "all_table" => Reward::AllTable { table: table() },
        "advancement" => Reward::Advancement {
            advancement: get_string(map, &["advancement"]).unwrap_or_default(),
        },
        "gamestage" | "stage" => Reward::Stage {
            stage: get_string(map, &["stage"]).unwrap_or_default(),
            remove: get_flag(map, "remove"),
        },
        "toast" => Reward::Toast {
            title: get_string(map, &["title"]).unwrap_or_default(),
            description: get_string(map, &["description"]).unwrap_or_default(),
            icon: get_icon(map),
        },
        "custom" => Reward::Custom {
            reward_type: get_string(map, &["custom_type"]).unwrap_or_default(),
            data: map
                .get("data")
                .and_then(Value::as_compound)
                .cloned()
                .unwrap_or_default(),
        },
        // unknown reward types survive as freeform data
        other => {
            let mut data = map.clone();
            data.shift_remove("type");
            Reward::Custom {
                reward_type: other.to_string(),
                data,
            }
        }
    };
    Ok(reward)
}

fn parse_dependencies(v: &Value, path: &str) -> Result<Vec<Dependency>> {
    let list = v
        .as_list()
        .ok_or_else(|| FormatError::shape(path, "a list"))?;
    list.iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            Value::Str(target) => Ok(Dependency::required(target.clone())),
            Value::Compound(m) => Ok(Dependency {
                target: get_string(m, &["target", "id"]).unwrap_or_default(),
                required: m.get("required").and_then(Value::as_bool).unwrap_or(true),
            }),
            _ => Err(FormatError::shape(format!("{path}/{i}"), "a quest id or compound")),
        })
        .collect()
}

fn parse_loot_table(map: &Compound, path: &str) -> Result<LootTable> {
    Ok(LootTable {
        id: get_string(map, &["id"]).unwrap_or_default(),
        pools: map_compounds(map, "pools", path, parse_loot_pool)?,
    })
}

fn parse_loot_pool(map: &Compound, path: &str) -> Result<LootPool> {
    Ok(LootPool {
        name: get_string(map, &["name"]).unwrap_or_default(),
        rolls: get_i32(map, "rolls").unwrap_or(1),
        entries: map_compounds(map, "entries", path, |m, p| {
            Ok(LootEntry {
                item: require_item(m, p)?,
                weight: m.get("weight").and_then(Value::as_f64).unwrap_or(1.0),
            })
        })?,
        conditions: map_compounds(map, "conditions", path, |m, _| {
            let (condition_type, params) = typed_params(m);
            Ok(LootCondition {
                condition_type,
                params,
            })
        })?,
        functions: map_compounds(map, "functions", path, |m, _| {
            let (function_type, params) = typed_params(m);
            Ok(LootFunction {
                function_type,
                params,
            })
        })?,
    })
}

/// `{type, params: {...}}`, or a flat compound whose other keys are the params.
fn typed_params(map: &Compound) -> (String, Compound) {
    let kind = get_string(map, &["type", "function", "condition"]).unwrap_or_default();
    if let Some(params) = map.get("params").and_then(Value::as_compound) {
        return (kind, params.clone());
    }
    let mut params = map.clone();
    for key in ["type", "function", "condition"] {
        params.shift_remove(key);
    }
    (kind, params)
}

/// Apply `f` to every compound of the list stored under `key`. A missing key is an
/// empty list.
fn map_compounds<T>(
    map: &Compound,
    key: &str,
    parent: &str,
    mut f: impl FnMut(&Compound, &str) -> Result<T>,
) -> Result<Vec<T>> {
    let path = if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}/{key}")
    };
    let Some(value) = map.get(key) else {
        return Ok(Vec::new());
    };
    let list = value
        .as_list()
        .ok_or_else(|| FormatError::shape(&path, "a list"))?;
    list.iter()
        .enumerate()
        .map(|(i, v)| {
            let item_path = format!("{path}/{i}");
            let m = v
                .as_compound()
                .ok_or_else(|| FormatError::shape(&item_path, "a compound"))?;
            f(m, &item_path)
        })
        .collect()
}

fn string_list(v: &Value, path: &str) -> Result<Vec<String>> {
    let list = v
        .as_list()
        .ok_or_else(|| FormatError::shape(path, "a list of ids"))?;
    Ok(list
        .iter()
        .filter_map(|e| {
            let s = e.as_str().map(str::to_string);
            if s.is_none() {
                warn!(path, found = e.type_name(), "skipping non-string chapter reference");
            }
            s
        })
        .collect())
}

fn get_string(map: &Compound, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| map.get(*k).and_then(Value::as_str))
        .map(str::to_string)
}

fn get_i32(map: &Compound, key: &str) -> Option<i32> {
    let v = map.get(key)?;
    match v.as_i64() {
        Some(n) => i32::try_from(n).ok(),
        None => v.as_f64().map(|f| f as i32),
    }
}

fn get_flag(map: &Compound, key: &str) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Icons are a bare id or an item compound with an `id`.
fn get_icon(map: &Compound) -> Option<String> {
    match map.get("icon")? {
        Value::Str(s) => Some(s.clone()),
        Value::Compound(m) => get_string(m, &["id"]),
        _ => None,
    }
}

fn get_visibility(map: &Compound, path: &str) -> Visibility {
    let Some(raw) = get_string(map, &["visibility"]) else {
        return Visibility::Visible;
    };
    raw.parse().unwrap_or_else(|e| {
        warn!(path, error = %e, "defaulting to VISIBLE");
        Visibility::Visible
    })
}

fn parse_item(v: &Value) -> Option<ItemRef> {
    match v {
        Value::Str(id) => Some(ItemRef::new(id.clone(), 1)),
        Value::Compound(m) => {
            let id = get_string(m, &["id", "item"])?;
            let count = get_i32(m, "count")
                .or_else(|| get_i32(m, "Count"))
                .unwrap_or(1);
            Some(ItemRef::new(id, count))
        }
        _ => None,
    }
}

fn require_item(map: &Compound, path: &str) -> Result<ItemRef> {
    map.get("item")
        .and_then(parse_item)
        .ok_or_else(|| FormatError::shape(format!("{path}/item"), "an item id or item compound"))
}

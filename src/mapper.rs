//! QuestFile <-> SNBT text.
//!
//! Export builds a value tree with a fixed key order per object (id, uid, title,
//! description, icon, background, visibility, tasks, rewards, dependencies, then
//! child collections) and hands it to the canonical writer, so diffs stay stable no
//! matter how the model was built.

use crate::error::Result;
use crate::id_registry::{IdKind, IdRegistry};
use crate::import::quest_file_from_compound;
use crate::model::*;
use crate::parser::parse_root_compound;
use crate::value::{Compound, Value};
use crate::writer::{WriterOptions, write_value};
use std::borrow::Cow;

/// Canonical text plus the file it was produced from.
#[derive(Debug, Clone, PartialEq)]
pub struct Formatted {
    pub text: String,
    pub quest_file: QuestFile,
}

pub fn to_snbt(file: &QuestFile) -> String {
    to_snbt_with(file, &WriterOptions::default())
}

pub fn to_snbt_with(file: &QuestFile, options: &WriterOptions) -> String {
    // fresh per export; never reused across snapshots
    let mut registry = IdRegistry::for_file(file);
    write_value(&quest_file_value(file, &mut registry), options)
}

pub fn from_snbt(text: &str) -> Result<QuestFile> {
    let root = parse_root_compound(text)?;
    quest_file_from_compound(&root)
}

/// Strip stray control characters, parse, and re-export canonically.
pub fn format(text: &str) -> Result<Formatted> {
    format_with(text, &WriterOptions::default())
}

pub fn format_with(text: &str, options: &WriterOptions) -> Result<Formatted> {
    let cleaned = strip_control_chars(text);
    let quest_file = from_snbt(&cleaned)?;
    Ok(Formatted {
        text: to_snbt_with(&quest_file, options),
        quest_file,
    })
}

/// Drop ISO control characters other than `\n`, `\r` and `\t`.
pub fn strip_control_chars(text: &str) -> Cow<'_, str> {
    let disallowed = |c: char| c.is_control() && !matches!(c, '\n' | '\r' | '\t');
    if text.chars().any(disallowed) {
        Cow::Owned(text.chars().filter(|c| !disallowed(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

struct Obj(Compound);

impl Obj {
    fn new() -> Self {
        Obj(Compound::new())
    }

    fn put(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    fn put_opt(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.put(key, v),
            None => self,
        }
    }

    /// Skips empty lists.
    fn put_list(self, key: &str, items: Vec<Value>) -> Self {
        if items.is_empty() { self } else { self.put(key, items) }
    }

    fn build(self) -> Value {
        Value::Compound(self.0)
    }
}

fn flag(b: bool) -> Value {
    Value::Byte(b as i8)
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

fn quest_file_value(file: &QuestFile, reg: &mut IdRegistry) -> Value {
    let groups = file
        .chapter_groups
        .iter()
        .map(|g| chapter_group_value(g, reg))
        .collect::<Vec<_>>();
    let chapters = file
        .chapters
        .iter()
        .map(|c| chapter_value(c, reg))
        .collect::<Vec<_>>();
    let tables = file
        .loot_tables
        .iter()
        .map(|t| loot_table_value(t, reg))
        .collect::<Vec<_>>();
    Obj::new()
        .put("id", file.id.as_str())
        .put("title", file.title.as_str())
        .put("chapter_groups", groups)
        .put("chapters", chapters)
        .put("loot_tables", tables)
        .build()
}

fn chapter_group_value(group: &ChapterGroup, reg: &mut IdRegistry) -> Value {
    let chapter_ids = group
        .chapter_ids
        .iter()
        .map(|id| Value::from(id.as_str()))
        .collect::<Vec<_>>();
    Obj::new()
        .put("id", group.id.as_str())
        .put("uid", Value::Long(reg.id_for(IdKind::ChapterGroup, &group.id)))
        .put("title", group.title.as_str())
        .put_opt("icon", group.icon.as_deref())
        .put("visibility", group.visibility.as_str())
        .put("chapter_ids", chapter_ids)
        .build()
}

fn chapter_value(chapter: &Chapter, reg: &mut IdRegistry) -> Value {
    let background = chapter.background.as_ref().map(|bg| {
        Obj::new()
            .put("texture", bg.texture.as_str())
            .put_opt("alignment", bg.alignment.as_deref())
            .put_opt("repeat", bg.repeat.map(flag))
            .build()
    });
    let uid = reg.id_for(IdKind::Chapter, &chapter.id);
    let quests = chapter
        .quests
        .iter()
        .map(|q| quest_value(q, reg))
        .collect::<Vec<_>>();
    Obj::new()
        .put("id", chapter.id.as_str())
        .put("uid", Value::Long(uid))
        .put("title", chapter.title.as_str())
        .put_opt("icon", chapter.icon.as_deref())
        .put_opt("background", background)
        .put("visibility", chapter.visibility.as_str())
        .put("quests", quests)
        .build()
}

fn quest_value(quest: &Quest, reg: &mut IdRegistry) -> Value {
    let uid = reg.id_for(IdKind::Quest, &quest.id);
    let dependencies = quest
        .dependencies
        .iter()
        .map(|d| {
            Obj::new()
                .put("target", d.target.as_str())
                .put("target_uid", Value::Long(reg.id_for(IdKind::Quest, &d.target)))
                .put("required", flag(d.required))
                .build()
        })
        .collect();
    Obj::new()
        .put("id", quest.id.as_str())
        .put("uid", Value::Long(uid))
        .put("title", quest.title.as_str())
        .put_opt("description", non_empty(&quest.description))
        .put_opt("icon", quest.icon.as_deref())
        .put("visibility", quest.visibility.as_str())
        .put_list("tasks", quest.tasks.iter().map(task_value).collect())
        .put_list("rewards", quest.rewards.iter().map(reward_value).collect())
        .put_list("dependencies", dependencies)
        .build()
}

fn item_value(item: &ItemRef) -> Value {
    Obj::new()
        .put("id", item.id.as_str())
        .put("count", Value::Int(item.count))
        .build()
}

fn task_value(task: &Task) -> Value {
    let obj = Obj::new().put("type", task.type_name());
    let obj = match task {
        Task::Item { item, consume } => obj
            .put("item", item_value(item))
            .put("consume", flag(*consume)),
        Task::Advancement { advancement } => obj.put("advancement", advancement.as_str()),
        Task::Location {
            dimension,
            x,
            y,
            z,
            radius,
        } => obj
            .put("dimension", dimension.as_str())
            .put("x", Value::Int(*x))
            .put("y", Value::Int(*y))
            .put("z", Value::Int(*z))
            .put("radius", Value::Int(*radius)),
    };
    obj.build()
}

fn reward_value(reward: &Reward) -> Value {
    let obj = Obj::new().put("type", reward.type_name());
    let obj = match reward {
        Reward::Item { item } => obj.put("item", item_value(item)),
        Reward::LootTable { table }
        | Reward::Choice { table }
        | Reward::Random { table }
        | Reward::AllTable { table } => obj.put("table", table.as_str()),
        Reward::XpLevels { levels } => obj.put("levels", Value::Int(*levels)),
        Reward::XpAmount { amount } => obj.put("amount", Value::Int(*amount)),
        Reward::Command {
            command,
            run_as_server,
        } => obj
            .put("command", command.as_str())
            .put("run_as_server", flag(*run_as_server)),
        Reward::Advancement { advancement } => obj.put("advancement", advancement.as_str()),
        Reward::Stage { stage, remove } => obj
            .put("stage", stage.as_str())
            .put("remove", flag(*remove)),
        Reward::Toast {
            title,
            description,
            icon,
        } => obj
            .put("title", title.as_str())
            .put("description", description.as_str())
            .put_opt("icon", icon.as_deref()),
        Reward::Custom { reward_type, data } => obj
            .put("custom_type", reward_type.as_str())
            .put("data", data.clone()),
    };
    obj.build()
}

fn loot_table_value(table: &LootTable, reg: &mut IdRegistry) -> Value {
    let pools = table.pools.iter().map(loot_pool_value).collect::<Vec<_>>();
    Obj::new()
        .put("id", table.id.as_str())
        .put("uid", Value::Long(reg.id_for(IdKind::LootTable, &table.id)))
        .put("pools", pools)
        .build()
}

fn loot_pool_value(pool: &LootPool) -> Value {
    let entries = pool
        .entries
        .iter()
        .map(|e| {
            Obj::new()
                .put("item", item_value(&e.item))
                .put("weight", Value::Double(e.weight))
                .build()
        })
        .collect::<Vec<_>>();
    let typed = |kind: &str, params: &Compound| {
        Obj::new()
            .put("type", kind)
            .put("params", params.clone())
            .build()
    };
    Obj::new()
        .put("name", pool.name.as_str())
        .put("rolls", Value::Int(pool.rolls))
        .put("entries", entries)
        .put_list(
            "conditions",
            pool.conditions
                .iter()
                .map(|c| typed(&c.condition_type, &c.params))
                .collect(),
        )
        .put_list(
            "functions",
            pool.functions
                .iter()
                .map(|f| typed(&f.function_type, &f.params))
                .collect(),
        )
        .build()
}

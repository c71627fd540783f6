use crate::value::Compound;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A whole quest pack: chapter groups, chapters and the loot tables rewards point at.
///
/// Values are snapshots: edits build a new `QuestFile` rather than mutating one in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QuestFile {
    pub id: String,
    pub title: String,
    pub chapter_groups: Vec<ChapterGroup>,
    pub chapters: Vec<Chapter>,
    pub loot_tables: Vec<LootTable>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Secret,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Visible => "VISIBLE",
            Visibility::Hidden => "HIDDEN",
            Visibility::Secret => "SECRET",
        }
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "VISIBLE" => Ok(Visibility::Visible),
            "HIDDEN" => Ok(Visibility::Hidden),
            "SECRET" => Ok(Visibility::Secret),
            other => Err(format!("unknown visibility '{other}'")),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChapterGroup {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    /// References into `QuestFile::chapters`, in display order.
    pub chapter_ids: Vec<String>,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub background: Option<Background>,
    pub quests: Vec<Quest>,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Background {
    pub texture: String,
    pub alignment: Option<String>,
    pub repeat: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub tasks: Vec<Task>,
    pub rewards: Vec<Reward>,
    pub dependencies: Vec<Dependency>,
    pub visibility: Visibility,
}

/// An item id with a stack size. Resource ids are opaque strings here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRef {
    pub id: String,
    pub count: i32,
}

impl ItemRef {
    pub fn new(id: impl Into<String>, count: i32) -> Self {
        ItemRef {
            id: id.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Task {
    Item {
        item: ItemRef,
        consume: bool,
    },
    Advancement {
        advancement: String,
    },
    Location {
        dimension: String,
        x: i32,
        y: i32,
        z: i32,
        radius: i32,
    },
}

impl Task {
    pub fn type_name(&self) -> &'static str {
        match self {
            Task::Item { .. } => "item",
            Task::Advancement { .. } => "advancement",
            Task::Location { .. } => "location",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reward {
    Item {
        item: ItemRef,
    },
    LootTable {
        table: String,
    },
    XpLevels {
        levels: i32,
    },
    XpAmount {
        amount: i32,
    },
    Command {
        command: String,
        run_as_server: bool,
    },
    Choice {
        table: String,
    },
    Random {
        table: String,
    },
    Advancement {
        advancement: String,
    },
    Stage {
        stage: String,
        remove: bool,
    },
    Toast {
        title: String,
        description: String,
        icon: Option<String>,
    },
    /// Reward types this crate does not model, carried as freeform data.
    Custom {
        reward_type: String,
        data: Compound,
    },
    AllTable {
        table: String,
    },
}

impl Reward {
    /// The `type` tag used in SNBT.
    pub fn type_name(&self) -> &'static str {
        match self {
            Reward::Item { .. } => "item",
            Reward::LootTable { .. } => "loot_table",
            Reward::XpLevels { .. } => "xp_levels",
            Reward::XpAmount { .. } => "xp",
            Reward::Command { .. } => "command",
            Reward::Choice { .. } => "choice",
            Reward::Random { .. } => "random",
            Reward::Advancement { .. } => "advancement",
            Reward::Stage { .. } => "gamestage",
            Reward::Toast { .. } => "toast",
            Reward::Custom { .. } => "custom",
            Reward::AllTable { .. } => "all_table",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub target: String,
    pub required: bool,
}

impl Dependency {
    pub fn required(target: impl Into<String>) -> Self {
        Dependency {
            target: target.into(),
            required: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LootTable {
    pub id: String,
    pub pools: Vec<LootPool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LootPool {
    pub name: String,
    pub rolls: i32,
    pub entries: Vec<LootEntry>,
    pub conditions: Vec<LootCondition>,
    pub functions: Vec<LootFunction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootEntry {
    pub item: ItemRef,
    /// Relative weight; must be positive, no upper bound.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LootCondition {
    pub condition_type: String,
    pub params: Compound,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LootFunction {
    pub function_type: String,
    pub params: Compound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("ERROR"),
            Severity::Warning => f.write_str("WARNING"),
        }
    }
}

/// A problem found by a validator. Always returned as data, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Slash-delimited locator, or a `$`-rooted path for schema issues.
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.path, self.message)
    }
}

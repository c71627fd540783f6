//! quest_snbt_tools - parse, canonicalize and validate SNBT quest packs
//!
//! SNBT (stringified NBT) is the text format quest-book mods use for their
//! quest files. This crate parses it into a generic typed tree, maps that tree
//! onto a quest model (groups, chapters, quests, loot tables), writes the model
//! back as canonical SNBT with stable numeric ids, and runs a set of
//! independent validators over the result.
//!
//! Basic example:
//!
//! ```rust
//! use quest_snbt_tools::{format, validate_quest_file};
//!
//! let formatted = format(r#"{id: "pack", title: "Pack", chapters: []}"#).unwrap();
//! assert!(formatted.text.starts_with("{\n  id: \"pack\","));
//! assert!(validate_quest_file(&formatted.quest_file).is_empty());
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod id_registry;
pub mod import;
pub mod loot_extract;
pub mod mapper;
pub mod merge;
pub mod model;
pub mod parser;
pub mod validation;
pub mod value;
pub mod writer;

pub use crate::error::*;
pub use crate::id_registry::{IdKind, IdRegistry};
pub use crate::loot_extract::{LootTableItem, LootTablePreview, extract_loot_items};
pub use crate::mapper::{Formatted, format, from_snbt, to_snbt};
pub use crate::merge::{ConflictPolicy, MergeInput, MergeSummary};
pub use crate::model::*;
pub use crate::parser::{parse, parse_root_compound};
pub use crate::validation::{ValidationPipeline, validate_quest_file, validate_snbt_schema};
pub use crate::value::{Compound, Value};
pub use crate::writer::{WriterOptions, write_value};

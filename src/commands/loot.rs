// Loot command - preview a loot table's items

use anyhow::{Context, Result};

use crate::cli::{OutputFormat, args::LootArgs};
use crate::loot_extract::{LootTablePreview, extract_loot_items};

pub fn handle_loot(args: &LootArgs) -> Result<bool> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let preview = extract_loot_items(&text);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&preview)?),
        OutputFormat::Text => print!("{}", render_text(&preview)),
    }
    Ok(true)
}

fn render_text(preview: &LootTablePreview) -> String {
    let mut out = format!("icon: {}\n", preview.icon);
    if preview.items.is_empty() {
        out.push_str("  (no items)\n");
    }
    for item in &preview.items {
        out.push_str(&format!("  {}x {} (weight {})\n", item.count, item.id, item.weight));
    }
    out
}

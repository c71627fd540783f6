// Dump command - print an SNBT file as JSON

use anyhow::{Context, Result};

use crate::cli::args::DumpArgs;
use crate::mapper::strip_control_chars;
use crate::parser::parse_root_compound;
use crate::value::Value;

pub fn handle_dump(args: &DumpArgs) -> Result<bool> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    println!("{}", snbt_to_json(&text).with_context(|| format!("Failed to parse {}", args.file.display()))?);
    Ok(true)
}

/// Pretty JSON for an SNBT root compound. Numeric widths are not preserved.
pub fn snbt_to_json(text: &str) -> Result<String> {
    let root = parse_root_compound(&strip_control_chars(text))?;
    Ok(serde_json::to_string_pretty(&Value::Compound(root))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_typed_values() {
        let json = snbt_to_json(r#"{id: "q", count: 3b, weight: 1.5f, flags: [B; 1b, 0b], tags: []}"#).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "id": "q",
          "count": 3,
          "weight": 1.5,
          "flags": [
            1,
            0
          ],
          "tags": []
        }
        "#);
    }

    #[test]
    fn rejects_non_compound_roots() {
        let err = snbt_to_json("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("compound"), "{err}");
    }
}

// Check command - validate quest files

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use super::collect_snbt_files;
use crate::cli::{OutputFormat, args::CheckArgs};
use crate::config::Config;
use crate::mapper::{from_snbt, strip_control_chars};
use crate::model::{Severity, ValidationIssue};
use crate::validation::{ValidationPipeline, validate_snbt_schema};

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub total_files: usize,
    pub files_with_errors: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub files: Vec<FileReport>,
    pub summary: CheckSummary,
}

impl CheckReport {
    fn new(files: Vec<FileReport>) -> Self {
        let mut summary = CheckSummary {
            total_files: files.len(),
            ..Default::default()
        };
        for report in &files {
            let errors = count(&report.issues, Severity::Error);
            summary.total_errors += errors;
            summary.total_warnings += count(&report.issues, Severity::Warning);
            if errors > 0 {
                summary.files_with_errors += 1;
            }
        }
        CheckReport { files, summary }
    }

    pub fn passed(&self, fail_on_warning: bool) -> bool {
        self.summary.total_errors == 0 && !(fail_on_warning && self.summary.total_warnings > 0)
    }
}

fn count(issues: &[ValidationIssue], severity: Severity) -> usize {
    issues.iter().filter(|i| i.severity == severity).count()
}

/// Schema checks, then (unless `schema_only`) the validator pipeline over the
/// mapped quest file. A file that does not parse stops at the schema stage.
pub fn check_text(text: &str, schema_only: bool, pipeline: &ValidationPipeline) -> Vec<ValidationIssue> {
    let cleaned = strip_control_chars(text);
    let mut issues = validate_snbt_schema(&cleaned);
    if schema_only || issues.iter().any(|i| i.path == "$") {
        return issues;
    }
    match from_snbt(&cleaned) {
        Ok(file) => issues.extend(pipeline.run(&file)),
        Err(e) => issues.push(ValidationIssue::error("$", e.to_string())),
    }
    issues
}

pub fn handle_check(args: &CheckArgs, config: &Config) -> Result<bool> {
    let (files, missing) = collect_snbt_files(&args.paths);
    let pipeline = config.validation.pipeline();

    let mut reports: Vec<FileReport> = missing
        .iter()
        .map(|path| FileReport {
            file: path.display().to_string(),
            issues: vec![ValidationIssue::error("$", "Path not found")],
        })
        .collect();

    for file in &files {
        let issues = match std::fs::read_to_string(file) {
            Ok(text) => check_text(&text, args.schema_only, &pipeline),
            Err(e) => vec![ValidationIssue::error("$", format!("Failed to read file: {e}"))],
        };
        info!(file = %file.display(), issues = issues.len(), "checked");
        reports.push(FileReport {
            file: file.display().to_string(),
            issues,
        });
    }

    let report = CheckReport::new(reports);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            for file in &report.files {
                for issue in &file.issues {
                    println!("{}: {}", file.file, issue);
                }
            }
            let s = &report.summary;
            println!(
                "Checked {} file(s): {} error(s), {} warning(s)",
                s.total_files, s.total_errors, s.total_warnings
            );
        }
    }

    Ok(report.passed(config.validation.fail_on_warning))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CYCLIC: &str = r#"{
        id: "pack",
        title: "Pack",
        chapters: [{
            id: "c",
            title: "C",
            quests: [
                {id: "a", title: "A", icon: "minecraft:stone", dependencies: ["b"]},
                {id: "b", title: "", icon: "minecraft:dirt", dependencies: ["a"]}
            ]
        }]
    }"#;

    #[test]
    fn runs_schema_then_pipeline() {
        let issues = check_text(CYCLIC, false, &ValidationPipeline::standard());
        let found: Vec<(Severity, &str)> = issues.iter().map(|i| (i.severity, i.path.as_str())).collect();
        assert_eq!(
            found,
            vec![
                (Severity::Warning, "chapters/c/quests/b"),
                (Severity::Error, "chapter/c/quests/a"),
            ]
        );
    }

    #[test]
    fn schema_only_skips_validators() {
        assert!(check_text(CYCLIC, true, &ValidationPipeline::standard()).is_empty());
    }

    #[test]
    fn parse_errors_stop_early() {
        let issues = check_text("{id: \"pack\"", false, &ValidationPipeline::standard());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.starts_with("SNBT parse error:"));
    }

    #[test]
    fn shape_errors_are_reported_once_mapped() {
        let issues = check_text(
            r#"{id: "pack", title: "P", chapters: [{id: "c", quests: [{id: "q", icon: "x", tasks: [{type: 3}]}]}]}"#,
            false,
            &ValidationPipeline::standard(),
        );
        let last = issues.last().unwrap();
        assert_eq!(last.path, "$");
        assert!(last.message.contains("chapters/0/quests/0/tasks/0/type"), "{last}");
    }

    #[test]
    fn json_report_shape() {
        let issues = check_text(
            r#"{id: "pack", title: "Pack",
                chapters: [{id: "c", title: "C", quests: [{id: "q", title: "", icon: "minecraft:dirt"}]}],
                loot_tables: [{id: "t", pools: [{name: "main", entries: [{item: "minecraft:a", weight: 0}]}]}]}"#,
            false,
            &ValidationPipeline::standard(),
        );
        let report = CheckReport::new(vec![FileReport {
            file: "pack.snbt".into(),
            issues,
        }]);
        assert!(!report.passed(false));
        insta::assert_json_snapshot!(report, @r#"
        {
          "files": [
            {
              "file": "pack.snbt",
              "issues": [
                {
                  "severity": "WARNING",
                  "path": "chapters/c/quests/q",
                  "message": "Quest title is empty"
                },
                {
                  "severity": "ERROR",
                  "path": "lootTables/t/pools/main/entries/0",
                  "message": "Invalid weight 0 for 'minecraft:a': must be positive"
                },
                {
                  "severity": "ERROR",
                  "path": "lootTables/t/pools/main",
                  "message": "Loot pool total weight must be positive, was 0"
                }
              ]
            }
          ],
          "summary": {
            "total_files": 1,
            "files_with_errors": 1,
            "total_errors": 2,
            "total_warnings": 1
          }
        }
        "#);
    }

    #[test]
    fn warnings_fail_only_when_configured() {
        let report = CheckReport::new(vec![FileReport {
            file: "a.snbt".into(),
            issues: vec![ValidationIssue::warning("questFile", "meh")],
        }]);
        assert_eq!(report.summary.total_warnings, 1);
        assert_eq!(report.summary.files_with_errors, 0);
        assert!(report.passed(false));
        assert!(!report.passed(true));
    }
}

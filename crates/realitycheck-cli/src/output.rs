//! Output formatting for the CLI.

use crate::commands::analysis::AnalysisReport;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use realitycheck_domain::{partition_findings, Finding, Level};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Codes whose drift `rc-db repair` can rewrite
const REPAIR_CODES: [&str; 3] = [
    "SOURCE_CLAIM_NOT_LISTED",
    "SOURCE_BACKLINK_MISSING",
    "PREDICTIONS_MISSING",
];

/// Codes that point at store setup rather than data
const DOCTOR_CODES: [&str; 2] = ["STORE_LOCATION_MISSING", "STORE_CONNECTION"];

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a record validation run (db or yaml).
    ///
    /// Counts reflect `strict` promotion; the findings are listed as emitted.
    pub fn format_findings(&self, findings: &[Finding], strict: bool) -> Result<String> {
        let (errors, warnings) = partition_findings(findings, strict);
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "ok": errors.is_empty(),
                    "error_count": errors.len(),
                    "warning_count": warnings.len(),
                    "findings": findings,
                });
                Ok(serde_json::to_string_pretty(&output)?)
            }
            OutputFormat::Text => Ok(self.format_findings_text(findings, errors.len(), warnings.len())),
        }
    }

    fn format_findings_text(&self, findings: &[Finding], errors: usize, warnings: usize) -> String {
        let mut lines = Vec::with_capacity(findings.len() + 4);

        let verdict = if errors > 0 { "FAIL" } else { "OK" };
        let headline = format!("{verdict}: {errors} error(s), {warnings} warning(s)");
        lines.push(if errors > 0 {
            self.colorize(&headline, "red")
        } else {
            self.colorize(&headline, "green")
        });

        for finding in findings {
            lines.push(format!(
                "{} [{}] {}",
                self.level_label(finding.level()),
                finding.code(),
                finding.message()
            ));
        }

        let commands = remediation(findings);
        if !commands.is_empty() {
            lines.push(String::new());
            lines.push("Suggested remediation:".to_string());
            lines.extend(commands.iter().map(|cmd| format!("  {cmd}")));
        }

        lines.join("\n")
    }

    /// Format an analysis validation run.
    pub fn format_analysis(&self, report: &AnalysisReport, quiet: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let results: Vec<serde_json::Value> = report
                    .results
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "path": r.path.display().to_string(),
                            "profile": r.profile_name(),
                            "errors": r.errors,
                            "warnings": r.warnings,
                        })
                    })
                    .collect();

                let output = serde_json::json!({
                    "results": results,
                    "total_errors": report.total_errors(),
                    "total_warnings": report.total_warnings(),
                    "status": report.status(),
                });
                Ok(serde_json::to_string_pretty(&output)?)
            }
            OutputFormat::Text => Ok(self.format_analysis_text(report, quiet)),
        }
    }

    fn format_analysis_text(&self, report: &AnalysisReport, quiet: bool) -> String {
        let mut lines = Vec::new();

        for result in &report.results {
            if quiet && result.errors.is_empty() && result.warnings.is_empty() {
                continue;
            }

            lines.push(format!("\n{} [{}]", result.path.display(), result.profile_name()));
            for error in &result.errors {
                lines.push(format!("  {}: {}", self.colorize("ERROR", "red"), error.message()));
            }
            for warning in &result.warnings {
                lines.push(format!(
                    "  {}: {}",
                    self.colorize("WARNING", "yellow"),
                    warning.message()
                ));
            }
        }

        if !quiet {
            let mut builder = Builder::default();
            builder.push_record(["Files checked", "Errors", "Warnings", "Status"]);
            builder.push_record([
                report.results.len().to_string(),
                report.total_errors().to_string(),
                report.total_warnings().to_string(),
                report.status().to_string(),
            ]);

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));

            lines.push(String::new());
            lines.push(table.to_string());
        }

        lines.join("\n")
    }

    fn level_label(&self, level: Level) -> String {
        match level {
            Level::Error => self.colorize(level.as_str(), "red"),
            Level::Warn => self.colorize(level.as_str(), "yellow"),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Follow-up commands suggested by a set of findings.
pub fn remediation(findings: &[Finding]) -> Vec<&'static str> {
    let has_any = |codes: &[&str]| findings.iter().any(|f| codes.contains(&f.code()));

    let mut commands = Vec::new();
    if has_any(&REPAIR_CODES) {
        commands.push("rc-db repair");
    }
    if has_any(&DOCTOR_CODES) {
        commands.push("rc-db doctor");
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use realitycheck_analysis::{Profile, ValidationResult};
    use std::path::PathBuf;

    fn drift() -> Vec<Finding> {
        vec![
            Finding::error(
                "SOURCE_CLAIM_NOT_LISTED",
                "S1: Claim C1 references this source but is not in claims_extracted",
            ),
            Finding::warn("CLAIM_NO_EMBEDDING", "TECH-2026-001: Missing embedding"),
        ]
    }

    #[test]
    fn test_text_report() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_findings(&drift(), false).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "FAIL: 1 error(s), 1 warning(s)");
        assert_eq!(lines[2], "WARN [CLAIM_NO_EMBEDDING] TECH-2026-001: Missing embedding");
        assert_eq!(&lines[lines.len() - 2..], ["Suggested remediation:", "  rc-db repair"]);
    }

    #[test]
    fn test_strict_counts() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let findings = vec![Finding::warn("CLAIM_NO_EMBEDDING", "x")];
        let output = formatter.format_findings(&findings, true).unwrap();
        assert!(output.starts_with("FAIL: 1 error(s), 0 warning(s)"));
        // Listed with their original level
        assert!(output.contains("WARN [CLAIM_NO_EMBEDDING] x"));
    }

    #[test]
    fn test_clean_text_report() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.format_findings(&[], false).unwrap(), "OK: 0 error(s), 0 warning(s)");
    }

    #[test]
    fn test_json_report() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_findings(&drift(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["error_count"], 2);
        assert_eq!(value["warning_count"], 0);
        assert_eq!(value["findings"][1]["level"], "WARN");
        assert_eq!(value["findings"][0]["code"], "SOURCE_CLAIM_NOT_LISTED");
    }

    #[test]
    fn test_remediation() {
        let findings = vec![
            Finding::error("STORE_CONNECTION", "Cannot connect to database: x"),
            Finding::error("PREDICTIONS_MISSING", "Missing prediction records for: A"),
        ];
        assert_eq!(remediation(&findings), ["rc-db repair", "rc-db doctor"]);
        assert!(remediation(&[Finding::error("CLAIM_TYPE_INVALID", "x")]).is_empty());
    }

    fn report() -> AnalysisReport {
        AnalysisReport {
            results: vec![
                ValidationResult {
                    path: PathBuf::from("analysis/sources/a.md"),
                    profile: Some(Profile::Full),
                    errors: vec![Finding::error("SECTION_MISSING", "Missing section: ### Core Thesis")],
                    warnings: vec![Finding::warn("CLAIM_IDS_ABSENT", "No claim IDs found")],
                },
                ValidationResult {
                    path: PathBuf::from("analysis/sources/b.md"),
                    profile: Some(Profile::Quick),
                    errors: Vec::new(),
                    warnings: Vec::new(),
                },
            ],
            missing: vec![PathBuf::from("gone.md")],
        }
    }

    #[test]
    fn test_analysis_text() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_analysis(&report(), false).unwrap();
        assert!(output.contains("analysis/sources/a.md [full]"));
        assert!(output.contains("  ERROR: Missing section: ### Core Thesis"));
        assert!(output.contains("  WARNING: No claim IDs found"));
        assert!(output.contains("analysis/sources/b.md [quick]"));
        assert!(output.contains("Files checked"));
        assert!(output.contains("FAIL"));
    }

    #[test]
    fn test_analysis_quiet() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_analysis(&report(), true).unwrap();
        assert!(output.contains("a.md [full]"));
        assert!(!output.contains("b.md"));
        assert!(!output.contains("Files checked"));
    }

    #[test]
    fn test_analysis_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_analysis(&report(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["results"][0]["profile"], "full");
        assert_eq!(value["results"][0]["errors"][0]["code"], "SECTION_MISSING");
        assert_eq!(value["total_errors"], 2);
        assert_eq!(value["total_warnings"], 1);
        assert_eq!(value["status"], "FAIL");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.level_label(Level::Error), "ERROR");
    }
}

use anyhow::{Context, Result};
use asnv_core::models::{ComplianceSummary, ValidationIssue, ValidationOutcome};
use std::fs;
use std::path::Path;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Writes the report to `output_path`
    pub fn generate(&self, outcome: &ValidationOutcome, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.render(outcome))
            .with_context(|| format!("Failed to write report: {}", output_path.display()))
    }

    /// Renders the report; every issue appears exactly once
    pub fn render(&self, outcome: &ValidationOutcome) -> String {
        let mut report = String::new();

        report.push_str("# ASN Validation Report\n\n");
        report.push_str(&Self::totals_line(&outcome.compliance_summary));
        report.push_str(&format!("Validated at: {}\n\n", outcome.timestamp));

        report.push_str(&format!("## {}\n\n", Self::final_status(outcome)));

        report.push_str("## All Validation Errors\n\n");
        if outcome.errors.is_empty() {
            report.push_str("All checks passed\n\n");
        } else {
            Self::push_issues(&mut report, &outcome.errors);
        }

        if !outcome.warnings.is_empty() {
            report.push_str(&format!("## Warnings ({})\n\n", outcome.warnings.len()));
            Self::push_issues(&mut report, &outcome.warnings);
        }

        let extra = &outcome.compliance_summary.extra;
        if !extra.is_empty() {
            report.push_str("## Compliance Summary\n\n");
            for (key, value) in extra {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                report.push_str(&format!("- **{}**: {}\n", key, value));
            }
            report.push('\n');
        }

        report
    }

    /// "ASN Validation Passed" or "ASN Validation Failed (N Error(s) Found)";
    /// plural only above one error
    pub fn final_status(outcome: &ValidationOutcome) -> String {
        if outcome.valid {
            return "ASN Validation Passed".to_string();
        }
        let count = outcome.error_count();
        format!(
            "ASN Validation Failed ({} Error{} Found)",
            count,
            if count > 1 { "s" } else { "" }
        )
    }

    fn totals_line(summary: &ComplianceSummary) -> String {
        let show = |value: Option<String>| value.unwrap_or_else(|| "n/a".to_string());
        format!(
            "Total Cartons: {} | Total Items: {} | Total Weight: {} lbs\n\n",
            show(summary.total_cartons.map(|v| v.to_string())),
            show(summary.total_items.map(|v| v.to_string())),
            show(summary.total_weight.map(|v| v.to_string())),
        )
    }

    fn push_issues(report: &mut String, issues: &[ValidationIssue]) {
        for issue in issues {
            report.push_str(&format!("- **{}**: {}\n", issue.field, issue.message));
            report.push_str(&format!("  - Impact: {}\n", issue.impact));
            report.push_str(&format!("  - Rule: `{}`\n", issue.rule));
        }
        report.push('\n');
    }
}

use anyhow::{Context, Result};
use asnv_core::models::ValidationOutcome;
use std::fs;
use std::path::Path;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Writes the report to `output_path`
    pub fn generate(&self, outcome: &ValidationOutcome, output_path: &Path) -> Result<()> {
        let json_string = serde_json::to_string_pretty(&self.build(outcome))?;
        fs::write(output_path, json_string)
            .with_context(|| format!("Failed to write report: {}", output_path.display()))
    }

    pub fn build(&self, outcome: &ValidationOutcome) -> serde_json::Value {
        serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "validated_at": outcome.timestamp,
            "valid": outcome.valid,
            "summary": {
                "errors": outcome.error_count(),
                "warnings": outcome.warning_count(),
                "compliance": outcome.compliance_summary,
            },
            "errors": outcome.errors,
            "warnings": outcome.warnings,
        })
    }
}

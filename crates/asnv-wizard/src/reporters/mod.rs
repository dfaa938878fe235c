pub mod json;
pub mod markdown;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

use crate::ReportFormat;
use anyhow::Result;
use asnv_core::models::ValidationOutcome;
use std::path::Path;

/// Writes `outcome` to `output_path` in the requested format
pub fn write_report(outcome: &ValidationOutcome, format: ReportFormat, output_path: &Path) -> Result<()> {
    match format {
        ReportFormat::Markdown => MarkdownReporter.generate(outcome, output_path),
        ReportFormat::Json => JsonReporter.generate(outcome, output_path),
    }
}

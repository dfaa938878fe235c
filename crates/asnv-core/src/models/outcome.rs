use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Result of one successful call to the compliance service.
///
/// A successful call is not a valid ASN: `valid` may be false with a
/// populated `errors` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<ValidationIssue>,
    #[serde(default)]
    pub warnings: Vec<ValidationIssue>,
    /// ISO-8601 timestamp as sent by the service
    pub timestamp: String,
    #[serde(default)]
    pub compliance_summary: ComplianceSummary,
}

/// Business-rule finding reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path to the offending attribute (e.g., "cartons.0.weight")
    pub field: String,
    pub message: String,
    /// Rule identifier (e.g., "data_integrity")
    pub rule: String,
    /// Business impact of the finding
    pub impact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Aggregate compliance figures; keys beyond the known totals are kept as-is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cartons: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_weight: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ValidationOutcome {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Parses the service timestamp, with or without a UTC offset
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|ts| ts.naive_utc())
            .or_else(|_| self.timestamp.parse::<NaiveDateTime>())
            .ok()
    }
}

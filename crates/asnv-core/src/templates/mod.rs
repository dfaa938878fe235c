use crate::busy::BusyFlag;
use crate::error::DocumentError;
use crate::models::Document;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

const VALID_TEMPLATES: &str = include_str!("valid.json");
const INVALID_TEMPLATES: &str = include_str!("invalid.json");

/// Which collection a sample is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleCategory {
    /// Documents expected to pass every compliance rule
    Valid,
    /// Documents that each violate at least one compliance rule
    Invalid,
}

impl fmt::Display for SampleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}

impl FromStr for SampleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "valid" => Ok(Self::Valid),
            "invalid" => Ok(Self::Invalid),
            other => Err(format!(
                "Unknown sample category: {}. Supported categories: valid, invalid",
                other
            )),
        }
    }
}

/// Fixed collections of example documents; sampling never touches the
/// network or mutates the collections
#[derive(Debug, Clone)]
pub struct TemplateProvider {
    valid: Vec<Document>,
    invalid: Vec<Document>,
    valid_loading: BusyFlag,
    invalid_loading: BusyFlag,
}

impl TemplateProvider {
    /// Creates a provider over the given collections.
    ///
    /// # Panics
    /// Panics if either collection is empty.
    pub fn new(valid: Vec<Document>, invalid: Vec<Document>) -> Self {
        assert!(!valid.is_empty(), "valid template collection must not be empty");
        assert!(
            !invalid.is_empty(),
            "invalid template collection must not be empty"
        );

        Self {
            valid,
            invalid,
            valid_loading: BusyFlag::new(),
            invalid_loading: BusyFlag::new(),
        }
    }

    /// Provider over the samples shipped with the crate
    pub fn builtin() -> Result<Self, DocumentError> {
        let valid = parse_collection(SampleCategory::Valid, VALID_TEMPLATES)?;
        let invalid = parse_collection(SampleCategory::Invalid, INVALID_TEMPLATES)?;
        Ok(Self::new(valid, invalid))
    }

    pub fn templates(&self, category: SampleCategory) -> &[Document] {
        match category {
            SampleCategory::Valid => &self.valid,
            SampleCategory::Invalid => &self.invalid,
        }
    }

    /// Picks a document uniformly at random from the requested collection
    pub fn sample(&self, category: SampleCategory) -> &Document {
        let templates = self.templates(category);
        let idx = rand::thread_rng().gen_range(0..templates.len());
        debug!(category = %category, index = idx, "Sampled template");
        &templates[idx]
    }

    /// True while a [`load`](Self::load) for this category is pending
    pub fn is_loading(&self, category: SampleCategory) -> bool {
        self.loading_flag(category).is_busy()
    }

    /// Samples after `delay`, gated per category.
    ///
    /// Returns `None` without waiting if a load for the same category is
    /// already pending. Different categories do not block each other.
    pub async fn load(&self, category: SampleCategory, delay: Duration) -> Option<Document> {
        let Some(_guard) = self.loading_flag(category).try_acquire() else {
            debug!(category = %category, "Template load already pending, ignoring request");
            return None;
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        Some(self.sample(category).clone())
    }

    fn loading_flag(&self, category: SampleCategory) -> &BusyFlag {
        match category {
            SampleCategory::Valid => &self.valid_loading,
            SampleCategory::Invalid => &self.invalid_loading,
        }
    }
}

fn parse_collection(category: SampleCategory, text: &str) -> Result<Vec<Document>, DocumentError> {
    serde_json::from_str(text).map_err(|source| DocumentError::Template {
        category: category.to_string(),
        source,
    })
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when the raw text is not parseable JSON
pub const MALFORMED_INPUT_MESSAGE: &str = "Invalid JSON format. Please check your input.";
/// Message shown when "proceed" is triggered with nothing to parse
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter ASN data to validate";
/// Fallback for a 422 whose body carries no usable detail list
pub const SCHEMA_REJECTION_FALLBACK: &str = "Data validation failed";
/// Fallback for a 5xx without a service-provided detail
pub const SERVER_ERROR_FALLBACK: &str = "Server error occurred";
/// Fallback for any other non-success status
pub const UNKNOWN_ERROR_FALLBACK: &str = "Validation failed";

/// Classification of a failed validation attempt.
///
/// `ValidationOutcome::valid == false` is not represented here: a document
/// with business-rule findings is a successful call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Raw text is not parseable JSON; never reaches the network
    MalformedInput,
    /// Service rejected the document shape before evaluating business rules (422)
    SchemaRejection,
    /// Service-side failure (5xx)
    ServerError,
    /// Network failure or undecodable response body
    TransportError,
    /// Any other non-success status
    Unknown,
    /// Another validation was already in flight
    Busy,
    /// The in-flight validation was cancelled by navigation
    Cancelled,
}

impl ErrorKind {
    /// Errors that send the user back to editing the raw text
    pub fn returns_to_input(self) -> bool {
        matches!(self, Self::MalformedInput | Self::SchemaRejection)
    }

    /// Control outcomes (`Busy`, `Cancelled`) are never displayed
    pub fn is_user_facing(self) -> bool {
        !matches!(self, Self::Busy | Self::Cancelled)
    }
}

/// A failed validation attempt reduced to a single displayable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ClassifiedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn malformed_input() -> Self {
        Self::new(ErrorKind::MalformedInput, MALFORMED_INPUT_MESSAGE)
    }

    pub fn schema_rejection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SchemaRejection, message)
    }

    pub fn server(detail: Option<String>) -> Self {
        Self::new(
            ErrorKind::ServerError,
            detail.unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string()),
        )
    }

    pub fn transport(description: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransportError, description)
    }

    pub fn unknown(detail: Option<String>) -> Self {
        Self::new(
            ErrorKind::Unknown,
            detail.unwrap_or_else(|| UNKNOWN_ERROR_FALLBACK.to_string()),
        )
    }

    pub fn busy() -> Self {
        Self::new(ErrorKind::Busy, "A validation request is already in progress")
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "Validation request was cancelled")
    }
}

/// Errors decoding or encoding an ASN document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("embedded {category} template collection is invalid: {source}")]
    Template {
        category: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_route_back_to_input() {
        assert!(ErrorKind::MalformedInput.returns_to_input());
        assert!(ErrorKind::SchemaRejection.returns_to_input());
        assert!(!ErrorKind::ServerError.returns_to_input());
        assert!(!ErrorKind::TransportError.returns_to_input());
        assert!(!ErrorKind::Unknown.returns_to_input());
    }

    #[test]
    fn control_kinds_are_hidden() {
        assert!(!ErrorKind::Busy.is_user_facing());
        assert!(!ErrorKind::Cancelled.is_user_facing());
        assert!(ErrorKind::Unknown.is_user_facing());
    }

    #[test]
    fn fallbacks_apply_when_detail_missing() {
        assert_eq!(ClassifiedError::server(None).message, SERVER_ERROR_FALLBACK);
        assert_eq!(ClassifiedError::unknown(None).message, UNKNOWN_ERROR_FALLBACK);
        assert_eq!(
            ClassifiedError::server(Some("db down".into())).to_string(),
            "db down"
        );
    }
}

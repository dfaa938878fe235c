use crate::cancel::CancelSignal;
use crate::classify::classify_response;
use crate::error::ClientError;
use asnv_core::models::ValidationOutcome;
use asnv_core::{BusyFlag, ClassifiedError};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Path of the compliance endpoint, relative to the service base URL
pub const VALIDATE_PATH: &str = "validate-asn";

/// Client for `POST /validate-asn`.
///
/// Cloning is cheap and clones share the busy flag, so at most one request
/// is in flight across all of them.
#[derive(Debug, Clone)]
pub struct ValidationClient {
    http: Client,
    endpoint: Url,
    busy: BusyFlag,
}

impl ValidationClient {
    /// Creates a client for the service at `base_url` (e.g., "http://localhost:8000")
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder().build()?;
        Self::with_http_client(http, base_url)
    }

    /// Creates a client reusing an existing HTTP client
    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let endpoint = endpoint_url(base_url)?;
        debug!(endpoint = %endpoint, "Validation client configured");
        Ok(Self {
            http,
            endpoint,
            busy: BusyFlag::new(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// True while a request is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Validates `raw_text` with no cancellation
    pub async fn validate(&self, raw_text: &str) -> Result<ValidationOutcome, ClassifiedError> {
        self.validate_until(raw_text, CancelSignal::never()).await
    }

    /// Validates `raw_text`, abandoning the request if `cancel` fires first.
    ///
    /// Malformed input is reported without any network call. A call made
    /// while another is in flight returns `ErrorKind::Busy`; one abandoned
    /// through `cancel` returns `ErrorKind::Cancelled`.
    pub async fn validate_until(
        &self,
        raw_text: &str,
        mut cancel: CancelSignal,
    ) -> Result<ValidationOutcome, ClassifiedError> {
        let payload: Value = serde_json::from_str(raw_text).map_err(|err| {
            debug!(error = %err, "Raw text is not valid JSON, skipping request");
            ClassifiedError::malformed_input()
        })?;

        let Some(_guard) = self.busy.try_acquire() else {
            warn!(endpoint = %self.endpoint, "Validation already in flight, ignoring request");
            return Err(ClassifiedError::busy());
        };

        if cancel.is_cancelled() {
            return Err(ClassifiedError::cancelled());
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(endpoint = %self.endpoint, "Validation request cancelled");
                Err(ClassifiedError::cancelled())
            }
            result = self.submit(&payload) => result,
        };

        match &result {
            Ok(outcome) => info!(
                valid = outcome.valid,
                errors = outcome.errors.len(),
                warnings = outcome.warnings.len(),
                "Validation completed"
            ),
            Err(err) if err.kind.is_user_facing() => warn!(
                kind = ?err.kind,
                message = %err.message,
                "Validation failed"
            ),
            Err(_) => {}
        }

        result
    }

    async fn submit(&self, payload: &Value) -> Result<ValidationOutcome, ClassifiedError> {
        debug!(endpoint = %self.endpoint, "Submitting ASN for validation");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(body_read_error)?;
        debug!(status = %status, bytes = body.len(), "Validation service responded");

        classify_response(status, &body)
    }
}

fn transport_error(err: reqwest::Error) -> ClassifiedError {
    ClassifiedError::transport(format!("Could not reach the validation service: {}", err))
}

fn body_read_error(err: reqwest::Error) -> ClassifiedError {
    ClassifiedError::transport(format!(
        "Failed to read response from validation service: {}",
        err
    ))
}

fn endpoint_url(base_url: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut base = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", base.scheme())));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(VALIDATE_PATH).map_err(|e| invalid(e.to_string()))
}

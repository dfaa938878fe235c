use thiserror::Error;

/// Errors constructing a [`ValidationClient`](crate::ValidationClient)
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid service base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

pub mod cancel;
pub mod classify;
pub mod client;
pub mod error;

pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use classify::{classify_response, field_path};
pub use client::{ValidationClient, VALIDATE_PATH};
pub use error::ClientError;

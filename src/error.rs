//! Error types for the RIPEstat client

use crate::response::Message;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP status {status} without a parseable response envelope")]
    HttpStatus { status: u16 },

    // API-level errors
    #[error("data call returned status {status:?} (code {status_code})")]
    ApiStatus {
        status: String,
        status_code: u16,
        messages: Vec<Message>,
    },

    // Data format errors
    #[error("failed to decode response data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field in response data: {field}")]
    MissingField { field: &'static str },

    // Input validation errors
    #[error("invalid ASN: {0} (expected 0..=4294967295)")]
    InvalidAsn(u64),

    #[error("invalid resource: {0} (expected an ASN, IP address or prefix)")]
    InvalidResource(String),
}

// Helper methods for common error construction
impl Error {
    /// Create a missing field error
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create an invalid resource error
    pub fn invalid_resource(resource: impl Into<String>) -> Self {
        Self::InvalidResource(resource.into())
    }

    /// Messages the server attached to a failed data call, if any
    pub fn api_messages(&self) -> &[Message] {
        match self {
            Self::ApiStatus { messages, .. } => messages,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

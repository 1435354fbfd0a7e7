//! Error types for the Hunter client.

use thiserror::Error;

use crate::types::ErrorResponse;

/// Result type for Hunter client operations.
pub type Result<T> = std::result::Result<T, HunterError>;

/// Hunter client errors.
#[derive(Debug, Error)]
pub enum HunterError {
    /// The API key was rejected (HTTP 401)
    #[error("invalid API key")]
    Unauthorized,

    /// Too many requests (HTTP 429)
    #[error("rate limit exceeded")]
    RateLimited,

    /// Any other non-2xx response
    #[error("API error (HTTP {status}): {}", .details.as_deref().unwrap_or("no details"))]
    Api {
        status: u16,
        /// `errors[0].details` from the response body, when the body carried one.
        details: Option<String>,
    },

    /// No response received (connection refused, DNS failure, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// 2xx response whose body did not decode
    #[error("parse error: {0}")]
    Parse(String),
}

impl HunterError {
    /// Classify a non-2xx response from its status code and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            401 => HunterError::Unauthorized,
            429 => HunterError::RateLimited,
            _ => {
                let details = serde_json::from_str::<ErrorResponse>(body)
                    .ok()
                    .and_then(|resp| resp.errors.into_iter().find_map(|e| e.details));
                HunterError::Api { status, details }
            }
        }
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures the relay answers itself. Upstream HTTP errors are not here;
/// those are passed through as-is.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("API key is required")]
    MissingApiKey,

    /// The upstream could not be reached or did not answer.
    #[error("Failed to connect to Claude API")]
    Connect(#[source] reqwest::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingApiKey => StatusCode::UNAUTHORIZED,
            RelayError::Connect(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Transport detail, without the upstream URL.
    pub fn detail(&self) -> Option<String> {
        match self {
            RelayError::MissingApiKey => None,
            RelayError::Connect(e) => {
                let mut detail = e.to_string();
                if let Some(url) = e.url() {
                    detail = detail.replace(url.as_str(), "upstream");
                }
                Some(detail)
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = match self.detail() {
            Some(message) => json!({ "error": self.to_string(), "message": message }),
            None => json!({ "error": self.to_string() }),
        };
        (self.status(), Json(body)).into_response()
    }
}

//! Pass-through endpoints for the Anthropic Messages API.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::RelayError;

pub const API_KEY_HEADER: &str = "x-api-key";

fn api_key(headers: &HeaderMap) -> Result<&str, RelayError> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(RelayError::MissingApiKey)
}

async fn send_upstream(
    state: &AppState,
    api_key: &str,
    body: Bytes,
) -> Result<(StatusCode, Option<String>, Bytes), RelayError> {
    let response = state
        .http
        .post(&state.config.upstream_url)
        .header(API_KEY_HEADER, api_key)
        .header("anthropic-version", &state.config.anthropic_version)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .map_err(RelayError::Connect)?;

    let status =
        StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await.map_err(RelayError::Connect)?;

    Ok((status, content_type, body))
}

/// Forward a Messages request and relay the upstream answer unchanged
pub async fn messages_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, RelayError> {
    let key = api_key(&headers)?;

    let (status, content_type, body) = match send_upstream(&state, key, body).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = ?e.detail(), "Claude API request failed");
            return Err(e);
        }
    };

    if !status.is_success() {
        tracing::error!(
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&body),
            "Claude API returned an error"
        );
    }

    let content_type = content_type.unwrap_or_else(|| "application/json".to_string());
    Ok((status, [(CONTENT_TYPE, content_type)], body).into_response())
}

/// Check a key by sending a tiny fixed request
pub async fn test_key_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let key = match api_key(&headers) {
        Ok(key) => key,
        Err(e) => return e.into_response(),
    };

    let probe = json!({
        "model": state.config.test_model,
        "max_tokens": 10,
        "messages": [{ "role": "user", "content": "Hi" }],
    });

    let (status, _, body) = match send_upstream(&state, key, Bytes::from(probe.to_string())).await
    {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = ?e.detail(), "Claude API test failed");
            return (
                e.status(),
                Json(json!({
                    "success": false,
                    "error": e.to_string(),
                    "message": e.detail(),
                })),
            )
                .into_response();
        }
    };

    let data = serde_json::from_slice::<Value>(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));

    let reply = if status.is_success() {
        json!({ "success": true, "message": "API key is valid", "response": data })
    } else if status == StatusCode::UNAUTHORIZED {
        json!({ "success": false, "error": "Invalid API key" })
    } else {
        tracing::warn!(status = status.as_u16(), "Claude API test returned an error");
        json!({ "success": false, "error": data })
    };

    (status, Json(reply)).into_response()
}

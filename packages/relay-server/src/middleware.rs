use std::time::Instant;

use axum::{
    extract::Request,
    http::{header::USER_AGENT, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id for correlating log lines, stored in request extensions
#[derive(Clone, Debug)]
pub struct RequestId(pub Uuid);

/// Middleware to tag each request with an id and log its start and finish
///
/// The id is echoed back in the `x-request-id` response header.
pub async fn log_requests(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let start = Instant::now();

    tracing::info!(
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        user_agent = request
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-"),
        "Incoming request"
    );

    request.extensions_mut().insert(RequestId(request_id));
    let mut response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

//! Application setup and router.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::middleware::log_requests;
use crate::routes::{health_handler, messages_handler, not_found_handler, test_key_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler).fallback(not_found_handler))
        .route(
            "/api/claude/messages",
            post(messages_handler).fallback(not_found_handler),
        )
        .route(
            "/api/claude/test",
            post(test_key_handler).fallback(not_found_handler),
        )
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

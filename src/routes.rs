//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                - Health check (storage ping)
//! - `GET  /api-docs`              - Swagger UI
//! - `GET  /api-docs/openapi.json` - OpenAPI document
//! - `/api/*`                      - REST API (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configured origins, or any origin for `*`
//! - **Timeout** - `408 Request Timeout` after `REQUEST_TIMEOUT_SECS`
//! - **Rate limiting** - Per-IP token bucket on `/api`

use std::time::Duration;

use anyhow::Result;
use axum::Router;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::get;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;

/// Routes without network-facing middleware.
///
/// Used directly by handler tests, which have no peer address for the rate
/// limiter.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .merge(api::docs::swagger_ui())
        .with_state(state)
}

/// Constructs the application router with all routes and middleware.
///
/// # Errors
///
/// Returns an error when the rate limit settings are invalid.
pub fn app_router(state: AppState, config: &Config) -> Result<Router> {
    let api_router = api::routes::api_routes().layer(rate_limit::layer(
        config.rate_limit_per_second,
        config.rate_limit_burst,
    )?);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(api::docs::swagger_ui())
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(cors_layer(config))
        .layer(tracing::layer());

    Ok(router)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

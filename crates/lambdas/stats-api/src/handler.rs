// Copyright 2025 RISC Zero, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use juror_stats::{ComposerError, SourceError, StatisticsError, StatsError};
use lambda_http::Error;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::routes::{history, stats};
use crate::state::AppState;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the Lambda handler: upstream sources from `config`, wrapped in the axum router
pub fn create_handler(config: &ApiConfig) -> Result<Router, Error> {
    let state = AppState::new(config)?;
    Ok(create_app(Arc::new(state)))
}

/// Creates the axum application with all routes
pub fn create_app(state: Arc<AppState>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    // Build the router
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // OpenAPI spec endpoint (YAML format)
        .route("/openapi.yaml", get(openapi_yaml))
        // Swagger UI documentation with generated spec (includes /openapi.json automatically)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        // API v1 routes
        .nest("/v1", api_v1_routes(state))
        // Add CORS layer
        .layer(cors)
        // Add fallback for unmatched routes
        .fallback(not_found)
}

/// API v1 routes
fn api_v1_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(stats::status_routes())
        .nest("/history", history::routes())
        .nest("/stats", stats::routes())
        .with_state(state)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub(crate) async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "stats-api"
    }))
}

/// OpenAPI specification endpoint (YAML)
async fn openapi_yaml() -> Response {
    // Convert the generated JSON spec to YAML
    let openapi_json = ApiDoc::openapi();
    match serde_yaml::to_string(&openapi_json) {
        Ok(yaml) => ([(header::CONTENT_TYPE, "application/x-yaml")], yaml).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to convert to YAML: {}", err),
        )
            .into_response(),
    }
}

/// 404 handler
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": "The requested endpoint does not exist"
        })),
    )
}

fn status_for(err: &anyhow::Error) -> StatusCode {
    if err.downcast_ref::<ApiError>().is_some() {
        return StatusCode::BAD_REQUEST;
    }
    if err.downcast_ref::<SourceError>().is_some() {
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    if err.downcast_ref::<ComposerError>().is_some()
        || err.downcast_ref::<StatisticsError>().is_some()
    {
        return StatusCode::UNPROCESSABLE_ENTITY;
    }
    match err.downcast_ref::<StatsError>() {
        Some(StatsError::SourceUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        Some(StatsError::Composer(_)) | Some(StatsError::Statistics(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Global error handler that converts anyhow errors to HTTP responses
pub fn handle_error(err: anyhow::Error) -> impl IntoResponse {
    let status = status_for(&err);

    // Client errors carry their own message; upstream and internal details stay in the logs
    let message = match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            tracing::warn!("Request rejected: {:#}", err);
            err.to_string()
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            tracing::error!("Upstream source failed: {:?}", err);
            "Upstream data source unavailable. Please try again later.".to_string()
        }
        _ => {
            tracing::error!("Request failed: {:?}", err);
            "An internal error occurred. Please try again later.".to_string()
        }
    };

    (
        status,
        Json(json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message
        })),
    )
}

/// Create a cache control header value safely
pub fn cache_control(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static("public, max-age=60"))
}

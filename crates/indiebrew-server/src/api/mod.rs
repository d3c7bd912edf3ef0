mod nearby;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use indiebrew_core::{AppConfig, RankStrategy, DEFAULT_RADIUS_M, MAX_RESULTS};
use indiebrew_ranker::Assembler;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};
use crate::source::PlaceSource;

/// Per-request defaults taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchDefaults {
    pub radius_m: u32,
    pub max_results: usize,
    pub strategy: RankStrategy,
    pub require_coffee_hint: bool,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_RADIUS_M,
            max_results: MAX_RESULTS,
            strategy: RankStrategy::default(),
            require_coffee_hint: false,
        }
    }
}

impl SearchDefaults {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            radius_m: config.default_radius_m,
            max_results: config.max_results,
            strategy: config.default_strategy,
            require_coffee_hint: config.require_coffee_hint,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PlaceSource>,
    pub assembler: Arc<Assembler>,
    pub defaults: SearchDefaults,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn search_router(rate_limit: Option<RateLimitState>) -> Router<AppState> {
    let router = Router::new().route("/api/v1/coffee/nearby", get(nearby::nearby_coffee));

    match rate_limit {
        Some(rate_limit) => router.layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        )),
        None => router,
    }
}

/// Builds the full router. Passing `None` for `rate_limit` leaves every
/// route unlimited.
pub fn build_app(state: AppState, rate_limit: Option<RateLimitState>) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(search_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

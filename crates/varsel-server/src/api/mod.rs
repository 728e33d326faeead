mod cart;
mod variation;
mod widget;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use varsel_feed::VariationProvider;

use crate::cart_store::CartStore;
use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};
use crate::session::SessionState;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<VariationProvider>,
    pub sessions: SessionState,
    pub carts: CartStore,
    pub shop: Arc<ShopSettings>,
}

/// Display settings the selector needs, taken from loaded configuration.
#[derive(Debug, Clone)]
pub struct ShopSettings {
    pub currency_symbol: String,
    pub palette: Vec<String>,
    pub sizes: Vec<String>,
}

impl ShopSettings {
    #[must_use]
    pub fn from_config(config: &varsel_core::AppConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            palette: config.palette.clone(),
            sizes: config.sizes.clone(),
        }
    }
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
    feed: &'static str,
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
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Rejects a request whose nonce does not verify for its session.
pub(super) fn require_nonce(
    state: &AppState,
    request_id: &str,
    session_id: &str,
    nonce: &str,
) -> Result<(), ApiError> {
    if state.sessions.verify_nonce(session_id, nonce) {
        return Ok(());
    }
    tracing::warn!("rejected request with invalid or expired nonce");
    Err(ApiError::new(
        request_id,
        "unauthorized",
        "invalid or expired nonce",
    ))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn limited_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/widget/{product_id}", get(widget::get_widget))
        .route("/api/v1/variation/lookup", post(variation::lookup_variation))
        .route("/api/v1/cart/add", post(cart::add_to_cart))
        .route("/api/v1/cart", get(cart::get_cart))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        )))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(limited_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match state.provider.document().await {
        Some(_) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    feed: "ok",
                },
                meta,
            }),
        ),
        None => {
            tracing::warn!("health check: variation feed unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        feed: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

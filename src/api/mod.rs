//! REST API endpoints.
//!
//! Axum-based HTTP API exposing the read-only analytics and the
//! per-session selection state machine.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::models::TournamentRecord;
use crate::present::PanelContent;
use crate::store::ReferenceStore;

use self::state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Raw aggregate plus the panel it renders to.
///
/// `data` is absent when the request did not select enough to aggregate;
/// `panel` then holds the placeholder.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub panel: PanelContent,
}

impl<T> AnalyticsResponse<T> {
    pub fn new(data: T, panel: PanelContent) -> Self {
        Self {
            data: Some(data),
            panel,
        }
    }

    pub fn placeholder(message: &str) -> Self {
        Self {
            data: None,
            panel: PanelContent::placeholder(message),
        }
    }
}

/// Resolve an optional year parameter. Absent is `None`; an unknown year is an error.
pub fn resolve_tournament(
    store: &ReferenceStore,
    year: Option<u16>,
) -> Result<Option<&TournamentRecord>, ApiError> {
    let Some(year) = year else {
        return Ok(None);
    };
    store
        .tournament(year)
        .map(Some)
        .ok_or_else(|| ApiError::NotFound(format!("No World Cup in {}", year)))
}

/// Resolve an optional team parameter. Absent or blank is `None`; an unknown team is an error.
pub fn resolve_team<'a>(
    store: &'a ReferenceStore,
    team: Option<&str>,
) -> Result<Option<&'a str>, ApiError> {
    let Some(team) = team.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    store
        .all_teams()
        .get(team)
        .map(|t| Some(t.as_str()))
        .ok_or_else(|| ApiError::NotFound(format!("Unknown team '{}'", team)))
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(e) => {
            warn!("Invalid cors_origin '{}': {}, allowing any origin", origin, e);
            layer.allow_origin(Any)
        }
    }
}

/// Assemble every route on top of the shared state.
pub fn build_router(state: AppState) -> Router {
    use routes::{analytics, meta, sessions};

    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/api/health", get(meta::health))
        .route("/api/tournaments", get(meta::tournaments))
        .route("/api/years", get(meta::years))
        .route("/api/analytics/placements", get(analytics::placements))
        .route("/api/analytics/scorers", get(analytics::scorers))
        .route("/api/analytics/discipline", get(analytics::discipline))
        .route("/api/analytics/journey", get(analytics::journey))
        .route("/api/analytics/head-to-head", get(analytics::head_to_head))
        .route("/api/analytics/map", get(analytics::country_map))
        .route("/api/analytics/matches", get(analytics::matches))
        .route("/api/sessions", post(sessions::create_session))
        .route(
            "/api/sessions/:id",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/api/sessions/:id/events", post(sessions::post_event))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::build_router;
    use super::state::AppState;
    use crate::config::AppConfig;
    use crate::store::fixtures::shared_store;

    pub fn test_app() -> axum::Router {
        build_router(test_state())
    }

    pub fn test_state() -> AppState {
        AppState::new(shared_store(), AppConfig::default())
    }

    pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(request).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
        send(
            app,
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(app: axum::Router, uri: &str) -> StatusCode {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        send(app, request).await.0
    }
}

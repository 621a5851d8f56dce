use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::session::{DashboardView, Session, Transition, ViewEvent};

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub id: Uuid,
    pub view: DashboardView,
}

fn parse_session_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid session id '{}'", raw)))
}

async fn find_session(state: &AppState, raw: &str) -> Result<Arc<Mutex<Session>>, ApiError> {
    let id = parse_session_id(raw)?;
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Session {} not found", id)))
}

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let (id, view) = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionCreated { id, view }))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DashboardView>, ApiError> {
    let session = find_session(&state, &id).await?;
    let view = session.lock().await.view().clone();
    Ok(Json(view))
}

/// Apply one event; the session lock is held until the transition is merged.
pub async fn post_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<ViewEvent>,
) -> Result<Json<Transition>, ApiError> {
    let session = find_session(&state, &id).await?;
    let transition = session.lock().await.handle(event);
    Ok(Json(transition))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_session_id(&id)?;
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Session {} not found", id)))
    }
}

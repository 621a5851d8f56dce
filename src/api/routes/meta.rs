use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::AnalyticsResponse;
use crate::models::TournamentRecord;
use crate::present::Presenter;
use crate::store::IntegrityReport;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub tournaments: usize,
    pub matches: usize,
    pub player_events: usize,
    pub active_sessions: usize,
    pub integrity: IntegrityReport,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = &state.store;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        tournaments: store.tournaments().count(),
        matches: store.matches().len(),
        player_events: store.player_events().len(),
        active_sessions: state.sessions.len().await,
        integrity: store.integrity(),
    })
}

/// All tournaments, newest first.
pub async fn tournaments(
    State(state): State<AppState>,
) -> Json<AnalyticsResponse<Vec<TournamentRecord>>> {
    let store = &state.store;
    let presenter = Presenter::new(store.lookups());

    Json(AnalyticsResponse::new(
        store.tournaments().rev().cloned().collect(),
        presenter.tournaments_table(store.tournaments()),
    ))
}

#[derive(Debug, Serialize)]
pub struct YearsResponse {
    pub years: Vec<u16>,
}

pub async fn years(State(state): State<AppState>) -> Json<YearsResponse> {
    Json(YearsResponse {
        years: state.store.years_desc(),
    })
}

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::{resolve_team, resolve_tournament, AnalyticsResponse, ApiError};
use crate::calculate::{
    self, country_status_map, goals_by_stage, match_details, match_goals, placement_counts,
    team_journey, top_scorers, CountryStatusMap, HeadToHead, Leaderboard, MatchGoals,
    PlacementCounts, Scope, TeamJourney,
};
use crate::models::{CardType, MatchRecord};
use crate::present::{
    PanelContent, Presenter, PICK_OPPONENT, PICK_TEAM, PICK_YEAR, PICK_YEAR_DETAILS,
    PICK_YEAR_GOALS,
};

#[derive(Debug, Deserialize)]
pub struct YearParams {
    pub year: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct DisciplineParams {
    pub card: Option<String>,
    pub year: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct JourneyParams {
    pub year: Option<u16>,
    pub team: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HeadToHeadParams {
    pub team1: Option<String>,
    pub team2: Option<String>,
}

/// All-time when no year is given, otherwise that tournament.
fn optional_scope(state: &AppState, year: Option<u16>) -> Result<Scope, ApiError> {
    Ok(resolve_tournament(&state.store, year)?.map_or(Scope::AllTime, |t| Scope::Year(t.year)))
}

pub async fn placements(
    State(state): State<AppState>,
) -> Json<AnalyticsResponse<PlacementCounts>> {
    let counts = placement_counts(&state.store);
    let panel = Presenter::new(state.store.lookups()).placements_figure(&counts);
    Json(AnalyticsResponse::new(counts, panel))
}

pub async fn scorers(
    State(state): State<AppState>,
    Query(params): Query<YearParams>,
) -> Result<Json<AnalyticsResponse<Leaderboard>>, ApiError> {
    let scope = optional_scope(&state, params.year)?;
    let board = top_scorers(&state.store, scope, state.config.dashboard.leaderboard_size);
    let panel = Presenter::new(state.store.lookups()).leaderboard_table(&board);

    Ok(Json(AnalyticsResponse::new(board, panel)))
}

pub async fn discipline(
    State(state): State<AppState>,
    Query(params): Query<DisciplineParams>,
) -> Result<Json<AnalyticsResponse<Leaderboard>>, ApiError> {
    let card: CardType = params
        .card
        .as_deref()
        .unwrap_or("yellow")
        .parse()
        .map_err(ApiError::BadRequest)?;
    let scope = optional_scope(&state, params.year)?;
    let board = calculate::discipline(
        &state.store,
        scope,
        card,
        state.config.dashboard.leaderboard_size,
    );
    let panel = Presenter::new(state.store.lookups()).leaderboard_table(&board);

    Ok(Json(AnalyticsResponse::new(board, panel)))
}

#[derive(Debug, Serialize)]
pub struct JourneyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TeamJourney>,
    pub journey: PanelContent,
    pub player_stats: PanelContent,
}

pub async fn journey(
    State(state): State<AppState>,
    Query(params): Query<JourneyParams>,
) -> Result<Json<JourneyResponse>, ApiError> {
    let store = &state.store;
    let tournament = resolve_tournament(store, params.year)?;
    let team = resolve_team(store, params.team.as_deref())?;

    let (Some(tournament), Some(team)) = (tournament, team) else {
        let message = if tournament.is_none() { PICK_YEAR } else { PICK_TEAM };
        return Ok(Json(JourneyResponse {
            data: None,
            journey: PanelContent::placeholder(message),
            player_stats: PanelContent::placeholder(message),
        }));
    };

    let year = tournament.year;
    if !store.teams_in_year(year).iter().any(|t| t == team) {
        return Err(ApiError::NotFound(format!("{} did not play in {}", team, year)));
    }

    let data = team_journey(store, year, team);
    let presenter = Presenter::new(store.lookups());
    Ok(Json(JourneyResponse {
        journey: presenter.journey_table(&data),
        player_stats: presenter.player_stats_table(&data),
        data: Some(data),
    }))
}

pub async fn head_to_head(
    State(state): State<AppState>,
    Query(params): Query<HeadToHeadParams>,
) -> Result<Json<AnalyticsResponse<HeadToHead>>, ApiError> {
    let store = &state.store;
    let team1 = resolve_team(store, params.team1.as_deref())?;
    let team2 = resolve_team(store, params.team2.as_deref())?;

    let (Some(team1), Some(team2)) = (team1, team2) else {
        let message = if team1.is_none() { PICK_TEAM } else { PICK_OPPONENT };
        return Ok(Json(AnalyticsResponse::placeholder(message)));
    };
    if team1 == team2 {
        return Err(ApiError::BadRequest(
            "team1 and team2 must be different teams".to_string(),
        ));
    }

    let h2h = calculate::head_to_head(store, team1, team2);
    debug!("{} vs {}: {} matches", team1, team2, h2h.matches);
    let panel = Presenter::new(store.lookups()).head_to_head_panel(&h2h);

    Ok(Json(AnalyticsResponse::new(h2h, panel)))
}

pub async fn country_map(
    State(state): State<AppState>,
    Query(params): Query<YearParams>,
) -> Result<Json<AnalyticsResponse<CountryStatusMap>>, ApiError> {
    let Some(tournament) = resolve_tournament(&state.store, params.year)? else {
        return Ok(Json(AnalyticsResponse::placeholder(PICK_YEAR)));
    };
    let map = country_status_map(&state.store, tournament.year);
    let panel = Presenter::new(state.store.lookups()).country_map(&map);

    Ok(Json(AnalyticsResponse::new(map, panel)))
}

#[derive(Debug, Serialize)]
pub struct MatchesData {
    pub goals: Vec<MatchGoals>,
    pub goals_by_stage: Vec<(String, u32)>,
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MatchesData>,
    pub goals_figure: PanelContent,
    pub details: PanelContent,
}

pub async fn matches(
    State(state): State<AppState>,
    Query(params): Query<YearParams>,
) -> Result<Json<MatchesResponse>, ApiError> {
    let store = &state.store;
    let Some(tournament) = resolve_tournament(store, params.year)? else {
        return Ok(Json(MatchesResponse {
            data: None,
            goals_figure: PanelContent::placeholder(PICK_YEAR_GOALS),
            details: PanelContent::placeholder(PICK_YEAR_DETAILS),
        }));
    };
    let year = tournament.year;
    let goals = match_goals(store, year);
    let details = match_details(store, year);
    let presenter = Presenter::new(store.lookups());

    Ok(Json(MatchesResponse {
        goals_figure: presenter.match_goals_figure(year, &goals),
        details: presenter.match_details_table(year, &details),
        data: Some(MatchesData {
            goals,
            goals_by_stage: goals_by_stage(store, year),
            matches: details.into_iter().cloned().collect(),
        }),
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{get_json, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_placements() {
        let (status, json) = get_json(test_app(), "/api/analytics/placements").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["panel"]["kind"], "bar");
        assert_eq!(json["panel"]["stacked"], true);
        // Italy: 1982 winner, 1970 runner-up
        let italy = json["data"]["ranking"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["country"] == "Italy")
            .unwrap();
        assert_eq!(italy["first"], 1);
        assert_eq!(italy["second"], 1);
    }

    #[tokio::test]
    async fn test_scorers_all_time_and_year() {
        let (status, json) = get_json(test_app(), "/api/analytics/scorers").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["entries"][0]["player"], "ROSSI");
        assert_eq!(json["data"]["entries"][0]["count"], 5);

        let (_, json) = get_json(test_app(), "/api/analytics/scorers?year=1998").await;
        assert_eq!(json["data"]["entries"][0]["player"], "ZIDANE");
        assert_eq!(json["data"]["entries"][0]["count"], 2);
    }

    #[tokio::test]
    async fn test_scorers_unknown_year() {
        let (status, _) = get_json(test_app(), "/api/analytics/scorers?year=1930").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_discipline_red_counts_second_yellow() {
        let (status, json) =
            get_json(test_app(), "/api/analytics/discipline?card=red&year=1998").await;

        assert_eq!(status, StatusCode::OK);
        let entries = json["data"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["player"], "DESAILLY");
    }

    #[tokio::test]
    async fn test_discipline_bad_card() {
        let (status, json) = get_json(test_app(), "/api/analytics/discipline?card=green").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_journey() {
        let (status, json) =
            get_json(test_app(), "/api/analytics/journey?year=1998&team=France").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["matches"].as_array().unwrap().len(), 2);
        assert_eq!(json["journey"]["kind"], "table");
    }

    #[tokio::test]
    async fn test_journey_team_not_in_year() {
        let (status, _) =
            get_json(test_app(), "/api/analytics/journey?year=1998&team=Germany%20FR").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_selection_returns_placeholder() {
        let (status, json) = get_json(test_app(), "/api/analytics/journey?year=1998").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["journey"]["kind"], "placeholder");
        assert_eq!(json["player_stats"]["kind"], "placeholder");
        assert!(json.get("data").is_none());

        let (status, json) = get_json(test_app(), "/api/analytics/journey").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["journey"]["message"], "Select a World Cup year.");

        let (status, json) = get_json(test_app(), "/api/analytics/map").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["panel"]["kind"], "placeholder");
        assert!(json.get("data").is_none());

        let (status, json) = get_json(test_app(), "/api/analytics/matches").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["goals_figure"]["kind"], "placeholder");
        assert_eq!(json["details"]["kind"], "placeholder");

        let (status, json) =
            get_json(test_app(), "/api/analytics/head-to-head?team1=Brazil").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["panel"]["message"], "Select an opponent to compare head-to-head.");
    }

    #[tokio::test]
    async fn test_unknown_year_with_missing_team_still_not_found() {
        let (status, _) = get_json(test_app(), "/api/analytics/journey?year=1994").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_head_to_head() {
        let (status, json) = get_json(
            test_app(),
            "/api/analytics/head-to-head?team1=Brazil&team2=Italy",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["matches"], 2);
        assert_eq!(json["data"]["team1_wins"], 1);
        assert_eq!(json["data"]["team2_wins"], 1);
        assert_eq!(json["panel"]["kind"], "comparison");
    }

    #[tokio::test]
    async fn test_head_to_head_same_team() {
        let (status, _) = get_json(
            test_app(),
            "/api/analytics/head-to-head?team1=Brazil&team2=Brazil",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_map() {
        let (status, json) = get_json(test_app(), "/api/analytics/map?year=1998").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["panel"]["kind"], "choropleth");
        let fra = json["data"]["entries"]
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["iso_code"] == "FRA")
            .unwrap();
        assert_eq!(fra["status"], "Winner");
    }

    #[tokio::test]
    async fn test_matches() {
        let (status, json) = get_json(test_app(), "/api/analytics/matches?year=1998").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["matches"].as_array().unwrap().len(), 4);
        // Chronological: the group game on 10 June comes first
        assert_eq!(json["data"]["matches"][0]["id"], 30);
        assert_eq!(json["details"]["kind"], "table");
    }
}

//! Selection state machine.
//!
//! Each session holds one [`SelectionState`] and the last content pushed to
//! every panel. A [`ViewEvent`] goes through a single dispatch table; every
//! branch returns the next state together with a fully specified set of
//! [`PanelUpdates`], so panels that derive from overlapping selections can
//! never drift apart.

mod registry;

pub use registry::*;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calculate::{
    country_status_map, discipline, head_to_head, match_details, match_goals, placement_counts,
    team_journey, top_scorers, Scope, LEADERBOARD_SIZE,
};
use crate::models::CardType;
use crate::present::{
    PanelContent, Presenter, PICK_OPPONENT, PICK_TEAM, PICK_YEAR, PICK_YEAR_DETAILS, PICK_YEAR_GOALS,
};
use crate::store::ReferenceStore;

/// A user interaction that may change the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ViewEvent {
    SelectYear(u16),
    SelectTeam(String),
    SelectOpponent(String),
    /// Click on a country in the map; acts as `SelectTeam` for participants
    MapClick(String),
    Clear,
}

/// Current selection. Each variant carries exactly the fields that are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    NoSelection,
    YearSelected {
        year: u16,
    },
    TeamSelected {
        year: u16,
        team: String,
    },
    OpponentSelected {
        year: u16,
        team: String,
        opponent: String,
    },
}

impl SelectionState {
    pub fn year(&self) -> Option<u16> {
        match self {
            SelectionState::NoSelection => None,
            SelectionState::YearSelected { year }
            | SelectionState::TeamSelected { year, .. }
            | SelectionState::OpponentSelected { year, .. } => Some(*year),
        }
    }

    pub fn team(&self) -> Option<&str> {
        match self {
            SelectionState::TeamSelected { team, .. }
            | SelectionState::OpponentSelected { team, .. } => Some(team),
            _ => None,
        }
    }

    pub fn opponent(&self) -> Option<&str> {
        match self {
            SelectionState::OpponentSelected { opponent, .. } => Some(opponent),
            _ => None,
        }
    }

    /// Flat view of the selection.
    pub fn selection(&self) -> Selection {
        Selection {
            year: self.year(),
            team: self.team().map(str::to_string),
            opponent: self.opponent().map(str::to_string),
        }
    }
}

/// The three user selections as optional fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub year: Option<u16>,
    pub team: Option<String>,
    pub opponent: Option<String>,
}

/// Options, value and enabled flag of a dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectorState {
    pub options: Vec<String>,
    pub value: Option<String>,
    pub enabled: bool,
}

impl SelectorState {
    /// Empty and disabled.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Populated with no value chosen; disabled when there are no options.
    pub fn populated(options: &[String]) -> Self {
        Self {
            options: options.to_vec(),
            value: None,
            enabled: !options.is_empty(),
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }
}

/// Either replace a panel's content or leave it as it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "update", content = "content", rename_all = "snake_case")]
pub enum Update<T> {
    NoChange,
    Set(T),
}

impl<T> Update<T> {
    fn apply_to(self, target: &mut T) {
        if let Update::Set(value) = self {
            *target = value;
        }
    }
}

/// One entry per selection-dependent output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelUpdates {
    pub team_selector: Update<SelectorState>,
    pub opponent_selector: Update<SelectorState>,
    pub opponent_panel_visible: Update<bool>,
    pub country_map: Update<PanelContent>,
    pub year_scorers: Update<PanelContent>,
    pub year_yellow_cards: Update<PanelContent>,
    pub year_red_cards: Update<PanelContent>,
    pub match_goals: Update<PanelContent>,
    pub match_details: Update<PanelContent>,
    pub team_journey: Update<PanelContent>,
    pub player_stats: Update<PanelContent>,
    pub head_to_head: Update<PanelContent>,
}

impl PanelUpdates {
    /// Every output marked `NoChange`.
    pub fn unchanged() -> Self {
        Self {
            team_selector: Update::NoChange,
            opponent_selector: Update::NoChange,
            opponent_panel_visible: Update::NoChange,
            country_map: Update::NoChange,
            year_scorers: Update::NoChange,
            year_yellow_cards: Update::NoChange,
            year_red_cards: Update::NoChange,
            match_goals: Update::NoChange,
            match_details: Update::NoChange,
            team_journey: Update::NoChange,
            player_stats: Update::NoChange,
            head_to_head: Update::NoChange,
        }
    }
}


/// Full content of every panel at one revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub revision: u64,
    pub state: SelectionState,
    pub selection: Selection,

    /// Selectable years, newest first
    pub year_options: Vec<u16>,
    pub team_selector: SelectorState,
    pub opponent_selector: SelectorState,
    pub opponent_panel_visible: bool,

    // Selection-independent panels
    pub tournaments: PanelContent,
    pub placements: PanelContent,
    pub all_time_scorers: PanelContent,
    pub all_time_yellow_cards: PanelContent,
    pub all_time_red_cards: PanelContent,

    pub country_map: PanelContent,
    pub year_scorers: PanelContent,
    pub year_yellow_cards: PanelContent,
    pub year_red_cards: PanelContent,
    pub match_goals: PanelContent,
    pub match_details: PanelContent,
    pub team_journey: PanelContent,
    pub player_stats: PanelContent,
    pub head_to_head: PanelContent,
}

impl DashboardView {
    fn apply(&mut self, updates: PanelUpdates) {
        updates.team_selector.apply_to(&mut self.team_selector);
        updates.opponent_selector.apply_to(&mut self.opponent_selector);
        updates
            .opponent_panel_visible
            .apply_to(&mut self.opponent_panel_visible);
        updates.country_map.apply_to(&mut self.country_map);
        updates.year_scorers.apply_to(&mut self.year_scorers);
        updates.year_yellow_cards.apply_to(&mut self.year_yellow_cards);
        updates.year_red_cards.apply_to(&mut self.year_red_cards);
        updates.match_goals.apply_to(&mut self.match_goals);
        updates.match_details.apply_to(&mut self.match_details);
        updates.team_journey.apply_to(&mut self.team_journey);
        updates.player_stats.apply_to(&mut self.player_stats);
        updates.head_to_head.apply_to(&mut self.head_to_head);
    }
}

/// Per-session tunables.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSettings {
    pub leaderboard_size: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            leaderboard_size: LEADERBOARD_SIZE,
        }
    }
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub revision: u64,
    /// False when the event was ignored (disabled control, invalid choice)
    pub applied: bool,
    pub state: SelectionState,
    pub selection: Selection,
    pub updates: PanelUpdates,
}

/// Outcome of a dispatch branch.
enum Step {
    Ignored(&'static str),
    Apply {
        next: SelectionState,
        updates: PanelUpdates,
    },
}

/// One user's dashboard: a selection plus the panels derived from it.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    store: Arc<ReferenceStore>,
    settings: DashboardSettings,
    state: SelectionState,
    view: DashboardView,
}

impl Session {
    /// Start a session in `NoSelection` with every dependent panel on its placeholder.
    pub fn new(id: Uuid, store: Arc<ReferenceStore>, settings: DashboardSettings) -> Self {
        let presenter = Presenter::new(store.lookups());
        let size = settings.leaderboard_size;

        let view = DashboardView {
            revision: 0,
            state: SelectionState::NoSelection,
            selection: Selection::default(),
            year_options: store.years_desc(),
            team_selector: SelectorState::disabled(),
            opponent_selector: SelectorState::disabled(),
            opponent_panel_visible: false,
            tournaments: presenter.tournaments_table(store.tournaments()),
            placements: presenter.placements_figure(&placement_counts(&store)),
            all_time_scorers: presenter.leaderboard_table(&top_scorers(&store, Scope::AllTime, size)),
            all_time_yellow_cards: presenter.leaderboard_table(&discipline(
                &store,
                Scope::AllTime,
                CardType::Yellow,
                size,
            )),
            all_time_red_cards: presenter.leaderboard_table(&discipline(
                &store,
                Scope::AllTime,
                CardType::Red,
                size,
            )),
            country_map: PanelContent::placeholder(PICK_YEAR),
            year_scorers: PanelContent::placeholder(PICK_YEAR),
            year_yellow_cards: PanelContent::placeholder(PICK_YEAR),
            year_red_cards: PanelContent::placeholder(PICK_YEAR),
            match_goals: PanelContent::placeholder(PICK_YEAR_GOALS),
            match_details: PanelContent::placeholder(PICK_YEAR_DETAILS),
            team_journey: PanelContent::placeholder(PICK_TEAM),
            player_stats: PanelContent::placeholder(PICK_TEAM),
            head_to_head: PanelContent::placeholder(PICK_OPPONENT),
        };

        Self {
            id,
            store,
            settings,
            state: SelectionState::NoSelection,
            view,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Process one event to completion: transition, recompute, merge into the view.
    pub fn handle(&mut self, event: ViewEvent) -> Transition {
        match self.dispatch(event) {
            Step::Ignored(reason) => {
                debug!(session = %self.id, "Ignored event: {}", reason);
                Transition {
                    revision: self.view.revision,
                    applied: false,
                    state: self.state.clone(),
                    selection: self.state.selection(),
                    updates: PanelUpdates::unchanged(),
                }
            }
            Step::Apply { next, updates } => {
                self.state = next;
                self.view.revision += 1;
                self.view.state = self.state.clone();
                self.view.selection = self.state.selection();
                self.view.apply(updates.clone());
                debug!(session = %self.id, revision = self.view.revision, "Applied event");
                Transition {
                    revision: self.view.revision,
                    applied: true,
                    state: self.state.clone(),
                    selection: self.state.selection(),
                    updates,
                }
            }
        }
    }

    fn dispatch(&self, event: ViewEvent) -> Step {
        match event {
            ViewEvent::SelectYear(year) => self.on_select_year(year),
            ViewEvent::SelectTeam(team) => self.on_select_team(&team),
            ViewEvent::SelectOpponent(opponent) => self.on_select_opponent(&opponent),
            ViewEvent::MapClick(country) => self.on_map_click(&country),
            ViewEvent::Clear => Step::Apply {
                next: SelectionState::NoSelection,
                updates: cleared_updates(),
            },
        }
    }

    fn on_select_year(&self, year: u16) -> Step {
        let store = &self.store;
        let Some(tournament) = store.tournament(year) else {
            debug!(session = %self.id, "Unknown year {}, clearing selection", year);
            return Step::Apply {
                next: SelectionState::NoSelection,
                updates: cleared_updates(),
            };
        };

        let presenter = Presenter::new(store.lookups());
        let size = self.settings.leaderboard_size;
        let scope = Scope::Year(tournament.year);

        Step::Apply {
            next: SelectionState::YearSelected { year },
            updates: PanelUpdates {
                team_selector: Update::Set(SelectorState::populated(store.teams_in_year(year))),
                opponent_selector: Update::Set(SelectorState::disabled()),
                opponent_panel_visible: Update::Set(false),
                country_map: Update::Set(presenter.country_map(&country_status_map(store, year))),
                year_scorers: Update::Set(
                    presenter.leaderboard_table(&top_scorers(store, scope, size)),
                ),
                year_yellow_cards: Update::Set(presenter.leaderboard_table(&discipline(
                    store,
                    scope,
                    CardType::Yellow,
                    size,
                ))),
                year_red_cards: Update::Set(presenter.leaderboard_table(&discipline(
                    store,
                    scope,
                    CardType::Red,
                    size,
                ))),
                match_goals: Update::Set(
                    presenter.match_goals_figure(year, &match_goals(store, year)),
                ),
                match_details: Update::Set(
                    presenter.match_details_table(year, &match_details(store, year)),
                ),
                team_journey: Update::Set(PanelContent::placeholder(PICK_TEAM)),
                player_stats: Update::Set(PanelContent::placeholder(PICK_TEAM)),
                head_to_head: Update::Set(PanelContent::placeholder(PICK_OPPONENT)),
            },
        }
    }

    fn on_select_team(&self, team: &str) -> Step {
        let Some(year) = self.state.year() else {
            return Step::Ignored("team selector is disabled until a year is selected");
        };
        let teams = self.store.teams_in_year(year);
        if !teams.iter().any(|t| t == team) {
            return Step::Ignored("team did not play in the selected year");
        }

        let store = &self.store;
        let presenter = Presenter::new(store.lookups());
        let journey = team_journey(store, year, team);

        Step::Apply {
            next: SelectionState::TeamSelected {
                year,
                team: team.to_string(),
            },
            updates: PanelUpdates {
                team_selector: Update::Set(SelectorState::populated(teams).with_value(team)),
                // All-time opponents, not just this year's
                opponent_selector: Update::Set(SelectorState::populated(store.opponents_of(team))),
                opponent_panel_visible: Update::Set(true),
                team_journey: Update::Set(presenter.journey_table(&journey)),
                player_stats: Update::Set(presenter.player_stats_table(&journey)),
                head_to_head: Update::Set(PanelContent::placeholder(PICK_OPPONENT)),
                ..PanelUpdates::unchanged()
            },
        }
    }

    fn on_select_opponent(&self, opponent: &str) -> Step {
        let (Some(year), Some(team)) = (self.state.year(), self.state.team()) else {
            return Step::Ignored("opponent selector is disabled until a team is selected");
        };
        let opponents = self.store.opponents_of(team);
        if !opponents.iter().any(|o| o == opponent) {
            return Step::Ignored("team has never played this opponent");
        }

        let presenter = Presenter::new(self.store.lookups());
        let h2h = head_to_head(&self.store, team, opponent);

        Step::Apply {
            next: SelectionState::OpponentSelected {
                year,
                team: team.to_string(),
                opponent: opponent.to_string(),
            },
            updates: PanelUpdates {
                opponent_selector: Update::Set(
                    SelectorState::populated(opponents).with_value(opponent),
                ),
                head_to_head: Update::Set(presenter.head_to_head_panel(&h2h)),
                ..PanelUpdates::unchanged()
            },
        }
    }

    fn on_map_click(&self, country: &str) -> Step {
        let participates = self
            .state
            .year()
            .is_some_and(|y| self.store.teams_in_year(y).iter().any(|t| t == country));
        if participates {
            self.on_select_team(country)
        } else {
            Step::Ignored("clicked country is not a participant in the selected year")
        }
    }
}

/// Updates that return every dependent output to its empty state.
fn cleared_updates() -> PanelUpdates {
    PanelUpdates {
        team_selector: Update::Set(SelectorState::disabled()),
        opponent_selector: Update::Set(SelectorState::disabled()),
        opponent_panel_visible: Update::Set(false),
        country_map: Update::Set(PanelContent::placeholder(PICK_YEAR)),
        year_scorers: Update::Set(PanelContent::placeholder(PICK_YEAR)),
        year_yellow_cards: Update::Set(PanelContent::placeholder(PICK_YEAR)),
        year_red_cards: Update::Set(PanelContent::placeholder(PICK_YEAR)),
        match_goals: Update::Set(PanelContent::placeholder(PICK_YEAR_GOALS)),
        match_details: Update::Set(PanelContent::placeholder(PICK_YEAR_DETAILS)),
        team_journey: Update::Set(PanelContent::placeholder(PICK_TEAM)),
        player_stats: Update::Set(PanelContent::placeholder(PICK_TEAM)),
        head_to_head: Update::Set(PanelContent::placeholder(PICK_OPPONENT)),
    }
}

//! Presentation adapter.
//!
//! Turns aggregator output into renderable panel content: tables, bar
//! figures, a choropleth and a head-to-head card. Formatting only: dates,
//! `N/A` substitution and flag annotation. A country missing from the
//! lookup tables renders without a flag.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::calculate::{
    CountryStatus, CountryStatusMap, HeadToHead, Leaderboard, LeaderboardMetric, MatchGoals,
    PlacementCounts, TeamJourney,
};
use crate::lookup::ReferenceLookups;
use crate::models::{MatchRecord, Placement, TournamentRecord};

/// Text shown in place of a missing field.
pub const NOT_AVAILABLE: &str = "N/A";

// Placeholder messages for panels whose selection is missing
pub const PICK_YEAR: &str = "Select a World Cup year.";
pub const PICK_TEAM: &str = "Select a team to see its journey.";
pub const PICK_OPPONENT: &str = "Select an opponent to compare head-to-head.";
pub const PICK_YEAR_GOALS: &str = "Select a World Cup year to see match goals.";
pub const PICK_YEAR_DETAILS: &str = "Select a World Cup year to see match details.";

/// One table cell, optionally decorated with a flag.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_url: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            flag_url: None,
        }
    }

    pub fn or_na(text: Option<&str>) -> Self {
        Self::text(text.unwrap_or(NOT_AVAILABLE))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Table {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BarSeries {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// One value per category, aligned with `BarFigure::categories`
    pub values: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BarFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
    pub stacked: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MapLocation {
    pub iso_code: String,
    pub status: CountryStatus,
    pub value: u8,
    /// Team names folded into this entity; a click maps back to one of these
    pub aliases: Vec<String>,
    pub hover: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LegendItem {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChoroplethFigure {
    pub title: String,
    pub locations: Vec<MapLocation>,
    pub legend: Vec<LegendItem>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TeamBadge {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_url: Option<String>,
    pub wins: u32,
    pub goals: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ComparisonCard {
    pub title: String,
    pub team1: TeamBadge,
    pub team2: TeamBadge,
    pub draws: u32,
    pub matches: u32,
    pub fixtures: Table,
}

/// Content pushed to a named panel.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelContent {
    /// Nothing has been selected yet
    Placeholder { message: String },
    /// A valid selection matched no records
    NoneRecorded { message: String },
    Table(Table),
    Bar(BarFigure),
    Choropleth(ChoroplethFigure),
    Comparison(ComparisonCard),
}

impl PanelContent {
    pub fn placeholder(message: impl Into<String>) -> Self {
        PanelContent::Placeholder {
            message: message.into(),
        }
    }

    pub fn none_recorded(message: impl Into<String>) -> Self {
        PanelContent::NoneRecorded {
            message: message.into(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PanelContent::Placeholder { .. })
    }
}

/// Format a kick-off time, or `N/A`.
pub fn format_datetime(dt: Option<NaiveDateTime>) -> String {
    dt.map(|d| d.format("%d %b %Y %H:%M").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Stateless formatter over the lookup tables.
#[derive(Debug, Clone, Copy)]
pub struct Presenter<'a> {
    lookups: &'a ReferenceLookups,
}

impl<'a> Presenter<'a> {
    pub fn new(lookups: &'a ReferenceLookups) -> Self {
        Self { lookups }
    }

    fn flag(&self, country: &str) -> Option<String> {
        Some(self.lookups.country_to_flag_url(country)).filter(|u| !u.is_empty())
    }

    /// Cell with the country name and its flag, when known.
    pub fn team_cell(&self, country: &str) -> Cell {
        Cell {
            text: country.to_string(),
            flag_url: self.flag(country),
        }
    }

    pub fn placements_figure(&self, counts: &PlacementCounts) -> PanelContent {
        if counts.is_empty() {
            return PanelContent::none_recorded("No World Cup placement data available.");
        }

        let categories: Vec<String> = counts
            .country_order()
            .into_iter()
            .map(str::to_string)
            .collect();
        let series = Placement::ALL
            .iter()
            .map(|p| BarSeries {
                name: p.label().to_string(),
                color: Some(p.color().to_string()),
                values: counts.ranking.iter().map(|c| c.count(*p)).collect(),
            })
            .collect();

        PanelContent::Bar(BarFigure {
            title: "World Cup Top 4 Placements by Country".to_string(),
            x_label: "Country".to_string(),
            y_label: "Number of Top-4 Finishes".to_string(),
            categories,
            series,
            stacked: true,
        })
    }

    pub fn leaderboard_table(&self, board: &Leaderboard) -> PanelContent {
        let (noun, column) = match board.metric {
            LeaderboardMetric::Goals => ("goals", "Goals"),
            LeaderboardMetric::Cards(card) => (card.label(), "Cards"),
        };
        let scope = board.scope.label();

        if board.is_empty() {
            return PanelContent::none_recorded(format!(
                "No {} recorded ({}).",
                noun.to_lowercase(),
                scope
            ));
        }

        let rows = board
            .entries
            .iter()
            .map(|e| {
                let team = match e.team.as_deref() {
                    Some(name) => self.team_cell(name),
                    None => Cell::text(&e.team_initials),
                };
                vec![
                    Cell::text(e.position.to_string()),
                    Cell::text(&e.player),
                    team,
                    Cell::text(e.count.to_string()),
                ]
            })
            .collect();

        PanelContent::Table(Table {
            title: format!("Top {} ({})", board.metric.label(), scope),
            columns: vec!["#".into(), "Player".into(), "Team".into(), column.into()],
            rows,
        })
    }

    pub fn journey_table(&self, journey: &TeamJourney) -> PanelContent {
        if journey.matches.is_empty() {
            return PanelContent::none_recorded(format!(
                "No matches recorded for {} in {}.",
                journey.team, journey.year
            ));
        }

        let rows = journey
            .matches
            .iter()
            .map(|m| {
                vec![
                    Cell::text(format_datetime(m.datetime)),
                    Cell::text(&m.stage),
                    self.team_cell(&m.opponent),
                    Cell::text(&m.score),
                    Cell::text(m.result.label()),
                    Cell::or_na(m.win_conditions.as_deref()),
                ]
            })
            .collect();

        let (w, d, l) = journey.record();
        PanelContent::Table(Table {
            title: format!("{} at the {} World Cup ({}W {}D {}L)", journey.team, journey.year, w, d, l),
            columns: ["Date", "Stage", "Opponent", "Score", "Result", "Win Conditions"]
                .into_iter()
                .map(String::from)
                .collect(),
            rows,
        })
    }

    pub fn player_stats_table(&self, journey: &TeamJourney) -> PanelContent {
        if journey.players.is_empty() {
            return PanelContent::none_recorded(format!(
                "No goals or cards recorded for {} in {}.",
                journey.team, journey.year
            ));
        }

        let rows = journey
            .players
            .iter()
            .map(|p| {
                vec![
                    Cell::text(&p.player),
                    Cell::text(p.goals.to_string()),
                    Cell::text(p.yellows.to_string()),
                    Cell::text(p.reds.to_string()),
                ]
            })
            .collect();

        PanelContent::Table(Table {
            title: format!("{} Player Stats ({})", journey.team, journey.year),
            columns: ["Player", "Goals", "Yellow Cards", "Red Cards"]
                .into_iter()
                .map(String::from)
                .collect(),
            rows,
        })
    }

    pub fn head_to_head_panel(&self, h2h: &HeadToHead) -> PanelContent {
        if h2h.is_empty() {
            return PanelContent::none_recorded(format!(
                "{} and {} have never met.",
                h2h.team1, h2h.team2
            ));
        }

        let rows = h2h
            .fixtures
            .iter()
            .map(|f| {
                vec![
                    Cell::text(f.year.to_string()),
                    Cell::text(&f.stage),
                    Cell::text(format!("{} - {}", f.team1_goals, f.team2_goals)),
                ]
            })
            .collect();

        PanelContent::Comparison(ComparisonCard {
            title: format!("{} vs {}", h2h.team1, h2h.team2),
            team1: TeamBadge {
                name: h2h.team1.clone(),
                flag_url: self.flag(&h2h.team1),
                wins: h2h.team1_wins,
                goals: h2h.team1_goals,
            },
            team2: TeamBadge {
                name: h2h.team2.clone(),
                flag_url: self.flag(&h2h.team2),
                wins: h2h.team2_wins,
                goals: h2h.team2_goals,
            },
            draws: h2h.draws,
            matches: h2h.matches,
            fixtures: Table {
                title: "All Meetings".to_string(),
                columns: vec!["Year".into(), "Stage".into(), "Score".into()],
                rows,
            },
        })
    }

    pub fn country_map(&self, map: &CountryStatusMap) -> PanelContent {
        let locations = map
            .entries
            .iter()
            .map(|e| MapLocation {
                iso_code: e.iso_code.clone(),
                status: e.status,
                value: e.status.rank(),
                aliases: e.aliases.clone(),
                hover: format!("{}: {}", e.aliases.join(" / "), e.status.label()),
            })
            .collect();

        PanelContent::Choropleth(ChoroplethFigure {
            title: format!("World Cup {} Participation", map.year),
            locations,
            legend: CountryStatus::ALL
                .iter()
                .map(|s| LegendItem {
                    label: s.label().to_string(),
                    color: s.color().to_string(),
                })
                .collect(),
        })
    }

    pub fn match_goals_figure(&self, year: u16, goals: &[MatchGoals]) -> PanelContent {
        if goals.is_empty() {
            return PanelContent::none_recorded(format!("No match data for World Cup {}.", year));
        }

        let categories: Vec<String> = goals.iter().map(|g| g.match_number.to_string()).collect();

        // One series per stage so bars are coloured by stage
        let mut series: Vec<BarSeries> = Vec::new();
        for (i, g) in goals.iter().enumerate() {
            let idx = match series.iter().position(|s| s.name == g.stage) {
                Some(idx) => idx,
                None => {
                    series.push(BarSeries {
                        name: g.stage.clone(),
                        color: None,
                        values: vec![0; goals.len()],
                    });
                    series.len() - 1
                }
            };
            series[idx].values[i] = g.total_goals;
        }

        PanelContent::Bar(BarFigure {
            title: format!("Total Goals per Match in World Cup {}", year),
            x_label: "Match Number".to_string(),
            y_label: "Total Goals".to_string(),
            categories,
            series,
            stacked: true,
        })
    }

    pub fn match_details_table(&self, year: u16, matches: &[&MatchRecord]) -> PanelContent {
        if matches.is_empty() {
            return PanelContent::none_recorded(format!("No match data for World Cup {}.", year));
        }

        let rows = matches
            .iter()
            .map(|m| {
                vec![
                    Cell::text(format_datetime(m.datetime)),
                    Cell::text(&m.stage),
                    self.team_cell(&m.home_team),
                    Cell::text(m.home_goals.to_string()),
                    Cell::text(m.away_goals.to_string()),
                    self.team_cell(&m.away_team),
                    Cell::or_na(m.stadium.as_deref()),
                    Cell::or_na(m.city.as_deref()),
                    Cell::or_na(m.win_conditions.as_deref()),
                ]
            })
            .collect();

        PanelContent::Table(Table {
            title: format!("Match Results, World Cup {}", year),
            columns: [
                "Datetime",
                "Stage",
                "Home Team",
                "Home Goals",
                "Away Goals",
                "Away Team",
                "Stadium",
                "City",
                "Win Conditions",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            rows,
        })
    }

    pub fn tournaments_table<'t>(
        &self,
        tournaments: impl DoubleEndedIterator<Item = &'t TournamentRecord>,
    ) -> PanelContent {
        let rows: Vec<Vec<Cell>> = tournaments
            .rev()
            .map(|t| {
                let placed = |c: Option<&str>| match c {
                    Some(name) => self.team_cell(name),
                    None => Cell::text(NOT_AVAILABLE),
                };
                vec![
                    Cell::text(t.year.to_string()),
                    self.team_cell(&t.host),
                    Cell::or_na(t.continent.as_deref()),
                    placed(t.winner.as_deref()),
                    placed(t.runner_up.as_deref()),
                    placed(t.third.as_deref()),
                    placed(t.fourth.as_deref()),
                    Cell::or_na(t.goals_scored.map(|g| g.to_string()).as_deref()),
                    Cell::or_na(t.attendance.map(|a| a.to_string()).as_deref()),
                ]
            })
            .collect();

        if rows.is_empty() {
            return PanelContent::none_recorded("No tournaments loaded.");
        }

        PanelContent::Table(Table {
            title: "Tournaments".to_string(),
            columns: [
                "Year", "Host", "Continent", "Winner", "Runner-Up", "Third", "Fourth", "Goals",
                "Attendance",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            rows,
        })
    }
}

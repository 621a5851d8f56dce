use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{MatchId, MatchResult};
use crate::store::ReferenceStore;

/// One match from the selected team's point of view.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JourneyMatch {
    pub match_id: MatchId,
    pub datetime: Option<NaiveDateTime>,
    pub stage: String,
    pub opponent: String,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Team-oriented score, e.g. `"2 - 1"`
    pub score: String,
    pub result: MatchResult,
    pub win_conditions: Option<String>,
}

/// Goals and cards for one player of the selected team.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlayerStatLine {
    pub player: String,
    pub goals: u32,
    pub yellows: u32,
    pub reds: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TeamJourney {
    pub year: u16,
    pub team: String,
    /// Chronological
    pub matches: Vec<JourneyMatch>,
    /// Players with at least one goal or card, by goals descending then name
    pub players: Vec<PlayerStatLine>,
}

impl TeamJourney {
    pub fn record(&self) -> (u32, u32, u32) {
        self.matches.iter().fold((0, 0, 0), |(w, d, l), m| match m.result {
            MatchResult::Win => (w + 1, d, l),
            MatchResult::Draw => (w, d + 1, l),
            MatchResult::Loss => (w, d, l + 1),
        })
    }
}

/// Every match `team` played in `year`, plus that team's player stat lines.
pub fn team_journey(store: &ReferenceStore, year: u16, team: &str) -> TeamJourney {
    let mut matches = Vec::new();
    // match id -> initials the team used in that match
    let mut initials_by_match: BTreeMap<MatchId, &str> = BTreeMap::new();

    for m in store.matches_in_year(year).filter(|m| m.involves(team)) {
        let (goals_for, goals_against) = m.goals_for(team).unwrap_or_default();
        if let Some(initials) = m.initials_of(team) {
            initials_by_match.insert(m.id, initials);
        }
        matches.push(JourneyMatch {
            match_id: m.id,
            datetime: m.datetime,
            stage: m.stage.clone(),
            opponent: m.opponent_of(team).unwrap_or_default().to_string(),
            goals_for,
            goals_against,
            score: format!("{} - {}", goals_for, goals_against),
            result: MatchResult::from_goals(goals_for, goals_against),
            win_conditions: m.win_conditions.clone(),
        });
    }

    let mut lines: BTreeMap<&str, PlayerStatLine> = BTreeMap::new();
    for event in store.player_events() {
        let Some(initials) = initials_by_match.get(&event.match_id) else {
            continue;
        };
        if event.team_initials != *initials {
            continue;
        }
        let line = lines
            .entry(event.player_name.as_str())
            .or_insert_with(|| PlayerStatLine {
                player: event.player_name.clone(),
                goals: 0,
                yellows: 0,
                reds: 0,
            });
        line.goals += event.goals();
        line.yellows += event.yellows();
        line.reds += event.reds();
    }

    let mut players: Vec<PlayerStatLine> = lines
        .into_values()
        .filter(|l| l.goals + l.yellows + l.reds > 0)
        .collect();
    players.sort_by(|a, b| b.goals.cmp(&a.goals));

    TeamJourney {
        year,
        team: team.to_string(),
        matches,
        players,
    }
}

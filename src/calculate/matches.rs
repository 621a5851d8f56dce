use serde::Serialize;

use crate::models::MatchRecord;
use crate::store::ReferenceStore;

/// Total goals in one match, for the per-year goals figure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MatchGoals {
    /// 1-based position in the tournament's chronological order
    pub match_number: usize,
    pub stage: String,
    pub fixture: String,
    pub total_goals: u32,
}

/// Per-match goal totals for one tournament, chronological.
pub fn match_goals(store: &ReferenceStore, year: u16) -> Vec<MatchGoals> {
    store
        .matches_in_year(year)
        .enumerate()
        .map(|(i, m)| MatchGoals {
            match_number: i + 1,
            stage: m.stage.clone(),
            fixture: format!("{} vs {}", m.home_team, m.away_team),
            total_goals: m.total_goals(),
        })
        .collect()
}

/// Every match record of one tournament, chronological.
pub fn match_details(store: &ReferenceStore, year: u16) -> Vec<&MatchRecord> {
    store.matches_in_year(year).collect()
}

/// Goals per stage for one tournament, in order of first appearance.
pub fn goals_by_stage(store: &ReferenceStore, year: u16) -> Vec<(String, u32)> {
    let mut stages: Vec<(String, u32)> = Vec::new();
    for m in store.matches_in_year(year) {
        match stages.iter_mut().find(|(s, _)| *s == m.stage) {
            Some((_, goals)) => *goals += m.total_goals(),
            None => stages.push((m.stage.clone(), m.total_goals())),
        }
    }
    stages
}

use serde::Serialize;

use super::calculate_win_rate;
use crate::models::MatchId;
use crate::store::ReferenceStore;

/// One fixture between the two teams, from `team1`'s side.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Fixture {
    pub match_id: MatchId,
    pub year: u16,
    pub stage: String,
    pub team1_goals: u32,
    pub team2_goals: u32,
}

/// All-time record between two teams.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeadToHead {
    pub team1: String,
    pub team2: String,
    pub matches: u32,
    pub team1_wins: u32,
    pub draws: u32,
    /// Derived as `matches - team1_wins - draws`
    pub team2_wins: u32,
    pub team1_goals: u32,
    pub team2_goals: u32,
    pub team1_win_rate: f64,
    /// Chronological by year, then match id
    pub fixtures: Vec<Fixture>,
}

impl HeadToHead {
    pub fn is_empty(&self) -> bool {
        self.matches == 0
    }
}

/// Every recorded meeting of the two teams across all years, either side at home.
pub fn head_to_head(store: &ReferenceStore, team1: &str, team2: &str) -> HeadToHead {
    let mut fixtures: Vec<Fixture> = store
        .matches()
        .iter()
        .filter(|m| m.is_between(team1, team2))
        .filter_map(|m| {
            let (g1, g2) = m.goals_for(team1)?;
            Some(Fixture {
                match_id: m.id,
                year: m.year,
                stage: m.stage.clone(),
                team1_goals: g1,
                team2_goals: g2,
            })
        })
        .collect();
    fixtures.sort_by_key(|f| (f.year, f.match_id));

    let matches = fixtures.len() as u32;
    let team1_wins = fixtures
        .iter()
        .filter(|f| f.team1_goals > f.team2_goals)
        .count() as u32;
    let draws = fixtures
        .iter()
        .filter(|f| f.team1_goals == f.team2_goals)
        .count() as u32;
    let team2_wins = matches - team1_wins - draws;

    HeadToHead {
        team1: team1.to_string(),
        team2: team2.to_string(),
        matches,
        team1_wins,
        draws,
        team2_wins,
        team1_goals: fixtures.iter().map(|f| f.team1_goals).sum(),
        team2_goals: fixtures.iter().map(|f| f.team2_goals).sum(),
        team1_win_rate: calculate_win_rate(team1_wins, team2_wins, draws),
        fixtures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::sample_store;

    #[test]
    fn test_head_to_head_all_years() {
        let store = sample_store();
        let h2h = head_to_head(&store, "Brazil", "Italy");

        // 1970 final and 1982 group game; the orphaned 1994 match is excluded
        assert_eq!(h2h.matches, 2);
        assert_eq!(h2h.team1_wins, 1);
        assert_eq!(h2h.team2_wins, 1);
        assert_eq!(h2h.draws, 0);
        assert_eq!(h2h.team1_goals, 6);
        assert_eq!(h2h.team2_goals, 4);
        assert_eq!(
            h2h.fixtures.iter().map(|f| f.year).collect::<Vec<_>>(),
            vec![1970, 1982]
        );
    }

    #[test]
    fn test_head_to_head_is_symmetric() {
        let store = sample_store();
        let ab = head_to_head(&store, "Italy", "France");
        let ba = head_to_head(&store, "France", "Italy");

        assert_eq!(ab.matches, 1);
        assert_eq!(ab.draws, 1);
        assert_eq!(ab.team1_wins, ba.team2_wins);
        assert_eq!(ab.team1_goals, ba.team2_goals);
    }

    #[test]
    fn test_outcomes_sum_to_match_count() {
        let store = sample_store();
        let teams: Vec<_> = store.all_teams().iter().cloned().collect();
        for a in &teams {
            for b in &teams {
                if a == b {
                    continue;
                }
                let h2h = head_to_head(&store, a, b);
                assert_eq!(h2h.team1_wins + h2h.team2_wins + h2h.draws, h2h.matches);
            }
        }
    }

    #[test]
    fn test_never_met() {
        let store = sample_store();
        let h2h = head_to_head(&store, "England", "Brazil");
        assert!(h2h.is_empty());
        assert_eq!(h2h.team1_win_rate, 0.0);
    }
}

//! Match model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Match identifier as issued by the source data.
pub type MatchId = u64;

/// Team-oriented outcome of a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl MatchResult {
    /// Strict goal comparison; recorded goals are the only input.
    pub fn from_goals(goals_for: u32, goals_against: u32) -> Self {
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Equal => MatchResult::Draw,
            std::cmp::Ordering::Less => MatchResult::Loss,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchResult::Win => "Win",
            MatchResult::Draw => "Draw",
            MatchResult::Loss => "Loss",
        }
    }
}

/// Referee and assistants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Officials {
    pub referee: Option<String>,
    pub assistant_1: Option<String>,
    pub assistant_2: Option<String>,
}

/// A single played match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique identifier (after de-duplication)
    pub id: MatchId,

    /// Tournament year
    pub year: u16,

    pub stage: String,
    pub stadium: Option<String>,
    pub city: Option<String>,

    pub home_team: String,
    pub away_team: String,
    pub home_initials: String,
    pub away_initials: String,

    pub home_goals: u32,
    pub away_goals: u32,

    /// Kick-off time; `None` when the source value was unparsable
    pub datetime: Option<NaiveDateTime>,

    /// Free-text win condition (e.g. "win on penalties")
    pub win_conditions: Option<String>,

    pub attendance: Option<u64>,

    pub officials: Officials,
}

impl MatchRecord {
    /// Create a match with the mandatory fields set.
    pub fn new(
        id: MatchId,
        year: u16,
        stage: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_goals: u32,
        away_goals: u32,
    ) -> Self {
        let home_team = home_team.into();
        let away_team = away_team.into();
        Self {
            id,
            year,
            stage: stage.into(),
            home_initials: initials_for(&home_team),
            away_initials: initials_for(&away_team),
            home_team,
            away_team,
            home_goals,
            away_goals,
            stadium: None,
            city: None,
            datetime: None,
            win_conditions: None,
            attendance: None,
            officials: Officials::default(),
        }
    }

    /// Builder method to set team initials.
    pub fn with_initials(mut self, home: &str, away: &str) -> Self {
        self.home_initials = home.to_string();
        self.away_initials = away.to_string();
        self
    }

    /// Builder method to set kick-off time.
    pub fn with_datetime(mut self, datetime: NaiveDateTime) -> Self {
        self.datetime = Some(datetime);
        self
    }

    /// Builder method to set the venue.
    pub fn with_venue(mut self, stadium: &str, city: &str) -> Self {
        self.stadium = Some(stadium.to_string());
        self.city = Some(city.to_string());
        self
    }

    /// Whether the team played in this match, on either side.
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// Whether this match was a fixture between the two teams, in either order.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.home_team == a && self.away_team == b) || (self.home_team == b && self.away_team == a)
    }

    /// Opponent of `team`, or `None` if `team` did not play.
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if self.home_team == team {
            Some(&self.away_team)
        } else if self.away_team == team {
            Some(&self.home_team)
        } else {
            None
        }
    }

    /// (goals for, goals against) from `team`'s side.
    pub fn goals_for(&self, team: &str) -> Option<(u32, u32)> {
        if self.home_team == team {
            Some((self.home_goals, self.away_goals))
        } else if self.away_team == team {
            Some((self.away_goals, self.home_goals))
        } else {
            None
        }
    }

    /// Initials recorded for `team` in this match.
    pub fn initials_of(&self, team: &str) -> Option<&str> {
        if self.home_team == team {
            Some(&self.home_initials)
        } else if self.away_team == team {
            Some(&self.away_initials)
        } else {
            None
        }
    }

    pub fn total_goals(&self) -> u32 {
        self.home_goals + self.away_goals
    }
}

/// Fallback initials for records built without explicit ones.
fn initials_for(team: &str) -> String {
    team.chars()
        .filter(|c| c.is_alphabetic())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchRecord {
        MatchRecord::new(1, 1998, "Final", "Brazil", "France", 0, 3).with_initials("BRA", "FRA")
    }

    #[test]
    fn test_result_from_goals() {
        assert_eq!(MatchResult::from_goals(2, 1), MatchResult::Win);
        assert_eq!(MatchResult::from_goals(1, 1), MatchResult::Draw);
        assert_eq!(MatchResult::from_goals(0, 3), MatchResult::Loss);
    }

    #[test]
    fn test_team_oriented_accessors() {
        let m = sample();
        assert!(m.involves("France"));
        assert!(!m.involves("Italy"));
        assert_eq!(m.opponent_of("France"), Some("Brazil"));
        assert_eq!(m.goals_for("France"), Some((3, 0)));
        assert_eq!(m.goals_for("Brazil"), Some((0, 3)));
        assert_eq!(m.initials_of("Brazil"), Some("BRA"));
        assert_eq!(m.goals_for("Italy"), None);
    }

    #[test]
    fn test_is_between_either_order() {
        let m = sample();
        assert!(m.is_between("Brazil", "France"));
        assert!(m.is_between("France", "Brazil"));
        assert!(!m.is_between("Brazil", "Italy"));
    }

    #[test]
    fn test_default_initials() {
        let m = MatchRecord::new(2, 1930, "Group 1", "Uruguay", "Peru", 1, 0);
        assert_eq!(m.home_initials, "URU");
        assert_eq!(m.away_initials, "PER");
        assert_eq!(m.total_goals(), 1);
    }
}

//! Tournament overview model.

use serde::{Deserialize, Serialize};

/// The four placement slots recorded for each tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Placement {
    #[serde(rename = "1st Place")]
    First,
    #[serde(rename = "2nd Place")]
    Second,
    #[serde(rename = "3rd Place")]
    Third,
    #[serde(rename = "4th Place")]
    Fourth,
}

impl Placement {
    /// All placements in podium order.
    pub const ALL: [Placement; 4] = [
        Placement::First,
        Placement::Second,
        Placement::Third,
        Placement::Fourth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Placement::First => "1st Place",
            Placement::Second => "2nd Place",
            Placement::Third => "3rd Place",
            Placement::Fourth => "4th Place",
        }
    }

    /// Bar colour used by the placement figure.
    pub fn color(&self) -> &'static str {
        match self {
            Placement::First => "#FFD700",
            Placement::Second => "#C0C0C0",
            Placement::Third => "#CD7F32",
            Placement::Fourth => "#A9A9A9",
        }
    }
}

/// One tournament edition, keyed by year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentRecord {
    /// Tournament year (unique key)
    pub year: u16,

    /// Host country
    pub host: String,

    pub winner: Option<String>,
    pub runner_up: Option<String>,
    pub third: Option<String>,
    pub fourth: Option<String>,

    pub goals_scored: Option<u32>,
    pub qualified_teams: Option<u32>,
    pub matches_played: Option<u32>,
    pub attendance: Option<u64>,

    /// Host continent, derived from the lookup tables at load time
    pub continent: Option<String>,
}

impl TournamentRecord {
    /// Create a record with only the year and host set.
    pub fn new(year: u16, host: impl Into<String>) -> Self {
        Self {
            year,
            host: host.into(),
            winner: None,
            runner_up: None,
            third: None,
            fourth: None,
            goals_scored: None,
            qualified_teams: None,
            matches_played: None,
            attendance: None,
            continent: None,
        }
    }

    /// Builder method to set the top four.
    pub fn with_podium(
        mut self,
        winner: &str,
        runner_up: &str,
        third: &str,
        fourth: &str,
    ) -> Self {
        self.winner = Some(winner.to_string());
        self.runner_up = Some(runner_up.to_string());
        self.third = Some(third.to_string());
        self.fourth = Some(fourth.to_string());
        self
    }

    /// Country in the given placement slot, if recorded.
    pub fn placed(&self, placement: Placement) -> Option<&str> {
        match placement {
            Placement::First => self.winner.as_deref(),
            Placement::Second => self.runner_up.as_deref(),
            Placement::Third => self.third.as_deref(),
            Placement::Fourth => self.fourth.as_deref(),
        }
    }

    /// All recorded (placement, country) pairs in podium order.
    pub fn podium(&self) -> impl Iterator<Item = (Placement, &str)> + '_ {
        Placement::ALL
            .into_iter()
            .filter_map(move |p| self.placed(p).map(|c| (p, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_podium_skips_missing_slots() {
        let mut t = TournamentRecord::new(1930, "Uruguay");
        t.winner = Some("Uruguay".to_string());
        t.third = Some("USA".to_string());

        let podium: Vec<_> = t.podium().collect();
        assert_eq!(
            podium,
            vec![(Placement::First, "Uruguay"), (Placement::Third, "USA")]
        );
    }

    #[test]
    fn test_placement_labels_serialize() {
        let json = serde_json::to_string(&Placement::Second).unwrap();
        assert_eq!(json, "\"2nd Place\"");
        assert_eq!(Placement::Fourth.label(), "4th Place");
    }
}

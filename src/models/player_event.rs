//! Player event model and event-code tokenising.
//!
//! The raw event column packs several codes into one string, e.g.
//! `G40' Y70' O80'`. Codes are tokenised once at ingestion into
//! [`EventKind`] tags so aggregators never match on substrings.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::MatchId;

/// Kind of a single event token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// `G`
    Goal,
    /// `P`
    PenaltyGoal,
    /// `OG`
    OwnGoal,
    /// `MP`
    MissedPenalty,
    /// `Y`
    Yellow,
    /// `R`
    Red,
    /// `RSY` / `SY`
    SecondYellowRed,
    /// `I` / `IH`
    SubIn,
    /// `O` / `OH`
    SubOut,
}

impl EventKind {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "G" => Some(EventKind::Goal),
            "P" => Some(EventKind::PenaltyGoal),
            "OG" => Some(EventKind::OwnGoal),
            "MP" => Some(EventKind::MissedPenalty),
            "Y" => Some(EventKind::Yellow),
            "R" => Some(EventKind::Red),
            "RSY" | "SY" => Some(EventKind::SecondYellowRed),
            "I" | "IH" => Some(EventKind::SubIn),
            "O" | "OH" => Some(EventKind::SubOut),
            _ => None,
        }
    }

    /// Goals credited to the player: open play and converted penalties.
    pub fn is_goal(&self) -> bool {
        matches!(self, EventKind::Goal | EventKind::PenaltyGoal)
    }

    pub fn is_yellow(&self) -> bool {
        matches!(self, EventKind::Yellow)
    }

    /// Straight reds and reds for a second caution.
    pub fn is_red(&self) -> bool {
        matches!(self, EventKind::Red | EventKind::SecondYellowRed)
    }
}

/// Card colour selector for discipline leaderboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Yellow,
    Red,
}

impl CardType {
    pub fn matches(&self, kind: EventKind) -> bool {
        match self {
            CardType::Yellow => kind.is_yellow(),
            CardType::Red => kind.is_red(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardType::Yellow => "Yellow Cards",
            CardType::Red => "Red Cards",
        }
    }
}

impl std::str::FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yellow" | "y" => Ok(CardType::Yellow),
            "red" | "r" => Ok(CardType::Red),
            other => Err(format!("unknown card type: {}", other)),
        }
    }
}

/// One tokenised event code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventToken {
    pub kind: EventKind,
    pub minute: Option<u16>,
}

fn event_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Longer codes first so `RSY` is not read as `R`.
        Regex::new(r"(RSY|OG|MP|IH|OH|SY|G|P|Y|R|I|O)(\d+)?(?:\+\d+)?'?")
            .expect("event code pattern is valid")
    })
}

/// Tokenise a raw event column value. Unknown fragments are dropped.
pub fn parse_event_codes(raw: &str) -> Vec<EventToken> {
    event_code_regex()
        .captures_iter(raw)
        .filter_map(|caps| {
            let kind = EventKind::from_code(caps.get(1)?.as_str())?;
            let minute = caps.get(2).and_then(|m| m.as_str().parse().ok());
            Some(EventToken { kind, minute })
        })
        .collect()
}

/// A player's events within one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEventRecord {
    /// Match this row belongs to
    pub match_id: MatchId,

    /// Team initials as recorded in the players table
    pub team_initials: String,

    pub player_name: String,

    /// Tokenised event codes (may be empty)
    pub events: Vec<EventToken>,
}

impl PlayerEventRecord {
    /// Create a record, tokenising the raw event string.
    pub fn new(match_id: MatchId, team_initials: &str, player_name: &str, raw_events: &str) -> Self {
        Self {
            match_id,
            team_initials: team_initials.to_string(),
            player_name: player_name.to_string(),
            events: parse_event_codes(raw_events),
        }
    }

    /// Number of tokens satisfying `pred`.
    pub fn count_where(&self, pred: impl Fn(EventKind) -> bool) -> u32 {
        self.events.iter().filter(|t| pred(t.kind)).count() as u32
    }

    pub fn goals(&self) -> u32 {
        self.count_where(|k| k.is_goal())
    }

    pub fn yellows(&self) -> u32 {
        self.count_where(|k| k.is_yellow())
    }

    pub fn reds(&self) -> u32 {
        self.count_where(|k| k.is_red())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound_codes() {
        let tokens = parse_event_codes("G40' Y70' O80'");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], EventToken { kind: EventKind::Goal, minute: Some(40) });
        assert_eq!(tokens[1].kind, EventKind::Yellow);
        assert_eq!(tokens[2].kind, EventKind::SubOut);
    }

    #[test]
    fn test_parse_multi_letter_codes_first() {
        let kinds: Vec<_> = parse_event_codes("RSY88' OG12' MP30' IH46'")
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::SecondYellowRed,
                EventKind::OwnGoal,
                EventKind::MissedPenalty,
                EventKind::SubIn
            ]
        );
    }

    #[test]
    fn test_parse_concatenated_and_stoppage_time() {
        let tokens = parse_event_codes("G89'G90+2'");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].minute, Some(90));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_event_codes("").is_empty());
        assert!(parse_event_codes("   ").is_empty());
    }

    #[test]
    fn test_canonical_goal_rule() {
        let rec = PlayerEventRecord::new(1, "ITA", "Paolo ROSSI", "G12' P40' OG50' MP70'");
        assert_eq!(rec.goals(), 2);
    }

    #[test]
    fn test_card_counts() {
        let rec = PlayerEventRecord::new(1, "ARG", "Player", "Y10' Y60' RSY60' R80'");
        assert_eq!(rec.yellows(), 2);
        assert_eq!(rec.reds(), 2);
        assert!(CardType::Red.matches(EventKind::SecondYellowRed));
        assert!(!CardType::Yellow.matches(EventKind::Red));
    }

    #[test]
    fn test_card_type_from_str() {
        assert_eq!("Yellow".parse::<CardType>(), Ok(CardType::Yellow));
        assert_eq!("red".parse::<CardType>(), Ok(CardType::Red));
        assert!("green".parse::<CardType>().is_err());
    }
}

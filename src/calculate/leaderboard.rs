use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{CardType, EventKind};
use crate::store::ReferenceStore;

/// Default number of rows kept on a leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

/// Which matches a leaderboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    AllTime,
    Year(u16),
}

impl Scope {
    pub fn from_year(year: Option<u16>) -> Self {
        year.map_or(Scope::AllTime, Scope::Year)
    }

    pub fn label(&self) -> String {
        match self {
            Scope::AllTime => "All-Time".to_string(),
            Scope::Year(y) => y.to_string(),
        }
    }
}

/// What a leaderboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardMetric {
    Goals,
    Cards(CardType),
}

impl LeaderboardMetric {
    fn counts(&self, kind: EventKind) -> bool {
        match self {
            LeaderboardMetric::Goals => kind.is_goal(),
            LeaderboardMetric::Cards(card) => card.matches(kind),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaderboardMetric::Goals => "Goals",
            LeaderboardMetric::Cards(card) => card.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub position: usize,
    pub player: String,
    pub team_initials: String,
    /// Full team name, when the initials resolve
    pub team: Option<String>,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Leaderboard {
    pub scope: Scope,
    pub metric: LeaderboardMetric,
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group matching event tokens by (player, team), count, sort by count
/// descending then player name ascending, and keep the top `limit`.
pub fn leaderboard(
    store: &ReferenceStore,
    scope: Scope,
    metric: LeaderboardMetric,
    limit: usize,
) -> Leaderboard {
    let mut counts: HashMap<(&str, &str), u32> = HashMap::new();

    let in_scope = move |year: u16| match scope {
        Scope::AllTime => true,
        Scope::Year(y) => y == year,
    };

    for (event, _) in store.events_with_match(move |m| in_scope(m.year)) {
        let n = event.count_where(|k| metric.counts(k));
        if n > 0 {
            *counts
                .entry((event.player_name.as_str(), event.team_initials.as_str()))
                .or_default() += n;
        }
    }

    let mut rows: Vec<_> = counts.into_iter().collect();
    rows.sort_by(|((pa, ta), ca), ((pb, tb), cb)| {
        cb.cmp(ca).then_with(|| pa.cmp(pb)).then_with(|| ta.cmp(tb))
    });
    rows.truncate(limit);

    let entries = rows
        .into_iter()
        .enumerate()
        .map(|(i, ((player, initials), count))| LeaderboardEntry {
            position: i + 1,
            player: player.to_string(),
            team_initials: initials.to_string(),
            team: store.team_for_initials(initials).map(str::to_string),
            count,
        })
        .collect();

    Leaderboard {
        scope,
        metric,
        entries,
    }
}

/// Top goal scorers (open play and penalty goals).
pub fn top_scorers(store: &ReferenceStore, scope: Scope, limit: usize) -> Leaderboard {
    leaderboard(store, scope, LeaderboardMetric::Goals, limit)
}

/// Most-booked players for one card colour.
pub fn discipline(store: &ReferenceStore, scope: Scope, card: CardType, limit: usize) -> Leaderboard {
    leaderboard(store, scope, LeaderboardMetric::Cards(card), limit)
}

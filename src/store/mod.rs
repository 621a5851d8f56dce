//! Immutable, process-wide reference data.
//!
//! Built once from a loaded [`Dataset`] and shared as `Arc<ReferenceStore>`
//! across every session. Nothing here is mutated after [`ReferenceStore::build`].

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::lookup::ReferenceLookups;
use crate::models::{MatchId, MatchRecord, PlayerEventRecord, TournamentRecord};
use crate::storage::Dataset;

/// Records excluded while building the store.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Matches whose year has no tournament record
    pub orphaned_matches: usize,
    /// Player rows whose match id does not resolve
    pub unresolved_player_events: usize,
}

/// Read-only tables plus the indices the aggregators query.
#[derive(Debug)]
pub struct ReferenceStore {
    tournaments: BTreeMap<u16, TournamentRecord>,
    matches: Vec<MatchRecord>,
    player_events: Vec<PlayerEventRecord>,
    lookups: ReferenceLookups,

    match_index: HashMap<MatchId, usize>,
    matches_by_year: BTreeMap<u16, Vec<usize>>,
    teams_by_year: BTreeMap<u16, Vec<String>>,
    opponents: HashMap<String, Vec<String>>,
    all_teams: BTreeSet<String>,
    integrity: IntegrityReport,
}

impl ReferenceStore {
    /// Build the store, excluding orphaned matches and unresolvable events.
    pub fn build(dataset: Dataset, lookups: ReferenceLookups) -> Self {
        let mut integrity = IntegrityReport::default();

        let tournaments: BTreeMap<u16, TournamentRecord> = dataset
            .tournaments
            .into_iter()
            .map(|mut t| {
                t.continent = lookups.country_to_continent(&t.host).map(str::to_string);
                (t.year, t)
            })
            .collect();

        let matches: Vec<MatchRecord> = dataset
            .matches
            .into_iter()
            .filter(|m| {
                let known = tournaments.contains_key(&m.year);
                if !known {
                    debug!("Excluding match {}: no tournament for year {}", m.id, m.year);
                    integrity.orphaned_matches += 1;
                }
                known
            })
            .collect();

        let match_index: HashMap<MatchId, usize> =
            matches.iter().enumerate().map(|(i, m)| (m.id, i)).collect();

        let player_events: Vec<PlayerEventRecord> = dataset
            .player_events
            .into_iter()
            .filter(|e| {
                let known = match_index.contains_key(&e.match_id);
                if !known {
                    integrity.unresolved_player_events += 1;
                }
                known
            })
            .collect();

        let mut matches_by_year: BTreeMap<u16, Vec<usize>> = BTreeMap::new();
        let mut year_teams: BTreeMap<u16, BTreeSet<String>> = BTreeMap::new();
        let mut opponent_sets: HashMap<String, BTreeSet<String>> = HashMap::new();
        let mut all_teams = BTreeSet::new();

        for (i, m) in matches.iter().enumerate() {
            matches_by_year.entry(m.year).or_default().push(i);
            let teams = year_teams.entry(m.year).or_default();
            teams.insert(m.home_team.clone());
            teams.insert(m.away_team.clone());
            all_teams.insert(m.home_team.clone());
            all_teams.insert(m.away_team.clone());
            opponent_sets
                .entry(m.home_team.clone())
                .or_default()
                .insert(m.away_team.clone());
            opponent_sets
                .entry(m.away_team.clone())
                .or_default()
                .insert(m.home_team.clone());
        }

        // Chronological within a year; undated matches sort by id at the end
        for indices in matches_by_year.values_mut() {
            indices.sort_by(|&a, &b| {
                let (ma, mb) = (&matches[a], &matches[b]);
                match (ma.datetime, mb.datetime) {
                    (Some(da), Some(db)) => da.cmp(&db).then(ma.id.cmp(&mb.id)),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => ma.id.cmp(&mb.id),
                }
            });
        }

        if integrity.orphaned_matches > 0 || integrity.unresolved_player_events > 0 {
            warn!(
                "Excluded {} orphaned matches and {} unresolved player rows",
                integrity.orphaned_matches, integrity.unresolved_player_events
            );
        }
        info!(
            "Reference store ready: {} tournaments, {} matches, {} player rows, {} teams",
            tournaments.len(),
            matches.len(),
            player_events.len(),
            all_teams.len()
        );

        Self {
            tournaments,
            matches,
            player_events,
            lookups,
            match_index,
            matches_by_year,
            teams_by_year: year_teams
                .into_iter()
                .map(|(y, set)| (y, set.into_iter().collect()))
                .collect(),
            opponents: opponent_sets
                .into_iter()
                .map(|(t, set)| (t, set.into_iter().collect()))
                .collect(),
            all_teams,
            integrity,
        }
    }

    pub fn lookups(&self) -> &ReferenceLookups {
        &self.lookups
    }

    pub fn integrity(&self) -> IntegrityReport {
        self.integrity
    }

    /// All tournaments in ascending year order.
    pub fn tournaments(&self) -> impl DoubleEndedIterator<Item = &TournamentRecord> {
        self.tournaments.values()
    }

    pub fn tournament(&self, year: u16) -> Option<&TournamentRecord> {
        self.tournaments.get(&year)
    }

    /// Selectable years, newest first.
    pub fn years_desc(&self) -> Vec<u16> {
        self.tournaments.keys().rev().copied().collect()
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn player_events(&self) -> &[PlayerEventRecord] {
        &self.player_events
    }

    pub fn match_by_id(&self, id: MatchId) -> Option<&MatchRecord> {
        self.match_index.get(&id).map(|&i| &self.matches[i])
    }

    /// Matches of one year in chronological order.
    pub fn matches_in_year(&self, year: u16) -> impl Iterator<Item = &MatchRecord> {
        self.matches_by_year
            .get(&year)
            .into_iter()
            .flatten()
            .map(|&i| &self.matches[i])
    }

    /// Distinct home and away team names for the year, alphabetical.
    pub fn teams_in_year(&self, year: u16) -> &[String] {
        self.teams_by_year
            .get(&year)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every opponent `team` has faced in any year, alphabetical.
    pub fn opponents_of(&self, team: &str) -> &[String] {
        self.opponents
            .get(team)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every team that appears in at least one match.
    pub fn all_teams(&self) -> &BTreeSet<String> {
        &self.all_teams
    }

    /// Player rows whose match satisfies `pred`, paired with that match.
    pub fn events_with_match<'a>(
        &'a self,
        pred: impl Fn(&MatchRecord) -> bool + 'a,
    ) -> impl Iterator<Item = (&'a PlayerEventRecord, &'a MatchRecord)> + 'a {
        self.player_events.iter().filter_map(move |e| {
            let m = self.match_by_id(e.match_id)?;
            pred(m).then_some((e, m))
        })
    }

    /// Full team name for a set of initials, taken from the latest match using them.
    pub fn team_for_initials(&self, initials: &str) -> Option<&str> {
        self.matches.iter().rev().find_map(|m| {
            if m.home_initials == initials {
                Some(m.home_team.as_str())
            } else if m.away_initials == initials {
                Some(m.away_team.as_str())
            } else {
                None
            }
        })
    }
}

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use crate::store::ReferenceStore;

/// Participation level for one tournament, in ascending precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CountryStatus {
    #[serde(rename = "Participated Historically")]
    ParticipatedHistorically,
    #[serde(rename = "Active Participant")]
    ActiveParticipant,
    #[serde(rename = "Third Place")]
    ThirdPlace,
    #[serde(rename = "Runner-Up")]
    RunnerUp,
    Winner,
}

impl CountryStatus {
    pub const ALL: [CountryStatus; 5] = [
        CountryStatus::ParticipatedHistorically,
        CountryStatus::ActiveParticipant,
        CountryStatus::ThirdPlace,
        CountryStatus::RunnerUp,
        CountryStatus::Winner,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CountryStatus::ParticipatedHistorically => "Participated Historically",
            CountryStatus::ActiveParticipant => "Active Participant",
            CountryStatus::ThirdPlace => "Third Place",
            CountryStatus::RunnerUp => "Runner-Up",
            CountryStatus::Winner => "Winner",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            CountryStatus::ParticipatedHistorically => "#d9d9d9",
            CountryStatus::ActiveParticipant => "#7fb3d5",
            CountryStatus::ThirdPlace => "#CD7F32",
            CountryStatus::RunnerUp => "#C0C0C0",
            CountryStatus::Winner => "#FFD700",
        }
    }

    /// Numeric rank used as the choropleth value.
    pub fn rank(&self) -> u8 {
        *self as u8
    }
}

/// One map entity and the team names folded into it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CountryStatusEntry {
    pub iso_code: String,
    pub status: CountryStatus,
    /// Team names mapped to this entity, alphabetical
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CountryStatusMap {
    pub year: u16,
    /// Sorted by ISO code
    pub entries: Vec<CountryStatusEntry>,
    /// Team names with no map entity
    pub unmapped: Vec<String>,
}

impl CountryStatusMap {
    pub fn status_of(&self, iso_code: &str) -> Option<CountryStatus> {
        self.entries
            .iter()
            .find(|e| e.iso_code == iso_code)
            .map(|e| e.status)
    }
}

/// Status of every country that ever took part, for the given tournament year.
///
/// Several team names can map to one ISO entity (e.g. the UK home nations,
/// the German teams). The entity takes the highest status among its aliases.
pub fn country_status_map(store: &ReferenceStore, year: u16) -> CountryStatusMap {
    let mut statuses: BTreeMap<&str, CountryStatus> = BTreeMap::new();

    for team in store.all_teams() {
        bump(&mut statuses, team, CountryStatus::ParticipatedHistorically);
    }
    for tournament in store.tournaments() {
        for (_, country) in tournament.podium() {
            bump(&mut statuses, country, CountryStatus::ParticipatedHistorically);
        }
    }

    if let Some(tournament) = store.tournament(year) {
        bump(&mut statuses, &tournament.host, CountryStatus::ActiveParticipant);
        for team in store.teams_in_year(year) {
            bump(&mut statuses, team, CountryStatus::ActiveParticipant);
        }
        if let Some(fourth) = tournament.fourth.as_deref() {
            bump(&mut statuses, fourth, CountryStatus::ActiveParticipant);
        }
        if let Some(third) = tournament.third.as_deref() {
            bump(&mut statuses, third, CountryStatus::ThirdPlace);
        }
        if let Some(runner_up) = tournament.runner_up.as_deref() {
            bump(&mut statuses, runner_up, CountryStatus::RunnerUp);
        }
        if let Some(winner) = tournament.winner.as_deref() {
            bump(&mut statuses, winner, CountryStatus::Winner);
        }
    }

    let lookups = store.lookups();
    let mut entities: BTreeMap<&str, (CountryStatus, BTreeSet<&str>)> = BTreeMap::new();
    let mut unmapped = Vec::new();

    for (name, status) in statuses {
        let Some(iso) = lookups.country_to_iso_code(name) else {
            debug!("No map entity for {}", name);
            unmapped.push(name.to_string());
            continue;
        };
        let entry = entities
            .entry(iso)
            .or_insert((status, BTreeSet::new()));
        entry.0 = entry.0.max(status);
        entry.1.insert(name);
    }

    CountryStatusMap {
        year,
        entries: entities
            .into_iter()
            .map(|(iso, (status, aliases))| CountryStatusEntry {
                iso_code: iso.to_string(),
                status,
                aliases: aliases.into_iter().map(str::to_string).collect(),
            })
            .collect(),
        unmapped,
    }
}

fn bump<'a>(statuses: &mut BTreeMap<&'a str, CountryStatus>, name: &'a str, status: CountryStatus) {
    let current = statuses.entry(name).or_insert(status);
    *current = (*current).max(status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::sample_store;

    #[test]
    fn test_status_precedence_order() {
        assert!(CountryStatus::Winner > CountryStatus::RunnerUp);
        assert!(CountryStatus::RunnerUp > CountryStatus::ThirdPlace);
        assert!(CountryStatus::ThirdPlace > CountryStatus::ActiveParticipant);
        assert!(CountryStatus::ActiveParticipant > CountryStatus::ParticipatedHistorically);
    }

    #[test]
    fn test_statuses_for_1998() {
        let store = sample_store();
        let map = country_status_map(&store, 1998);

        assert_eq!(map.status_of("FRA"), Some(CountryStatus::Winner));
        assert_eq!(map.status_of("BRA"), Some(CountryStatus::RunnerUp));
        assert_eq!(map.status_of("HRV"), Some(CountryStatus::ThirdPlace));
        assert_eq!(map.status_of("NLD"), Some(CountryStatus::ActiveParticipant));
        assert_eq!(map.status_of("ITA"), Some(CountryStatus::ActiveParticipant));
        assert_eq!(map.status_of("URY"), Some(CountryStatus::ParticipatedHistorically));
        assert_eq!(map.status_of("DEU"), Some(CountryStatus::ParticipatedHistorically));
        assert!(map.unmapped.is_empty());
    }

    #[test]
    fn test_aliases_consolidate_to_highest_status() {
        let store = sample_store();
        let map = country_status_map(&store, 1998);

        // England only played in 1970; Scotland played in 1998
        let gbr = map.entries.iter().find(|e| e.iso_code == "GBR").unwrap();
        assert_eq!(gbr.status, CountryStatus::ActiveParticipant);
        assert_eq!(gbr.aliases, vec!["England", "Scotland"]);
    }

    #[test]
    fn test_one_entry_per_entity() {
        let store = sample_store();
        for year in store.years_desc() {
            let map = country_status_map(&store, year);
            let codes: BTreeSet<_> = map.entries.iter().map(|e| e.iso_code.as_str()).collect();
            assert_eq!(codes.len(), map.entries.len());
        }
    }

    #[test]
    fn test_unknown_year_is_all_historical() {
        let store = sample_store();
        let map = country_status_map(&store, 1850);
        assert!(map
            .entries
            .iter()
            .all(|e| e.status == CountryStatus::ParticipatedHistorically));
    }
}

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Placement;
use crate::store::ReferenceStore;

/// One country's top-4 record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CountryPlacements {
    pub country: String,
    pub first: u32,
    pub second: u32,
    pub third: u32,
    pub fourth: u32,
    pub total: u32,
}

impl CountryPlacements {
    fn new(country: &str) -> Self {
        Self {
            country: country.to_string(),
            first: 0,
            second: 0,
            third: 0,
            fourth: 0,
            total: 0,
        }
    }

    pub fn count(&self, placement: Placement) -> u32 {
        match placement {
            Placement::First => self.first,
            Placement::Second => self.second,
            Placement::Third => self.third,
            Placement::Fourth => self.fourth,
        }
    }

    fn record(&mut self, placement: Placement) {
        match placement {
            Placement::First => self.first += 1,
            Placement::Second => self.second += 1,
            Placement::Third => self.third += 1,
            Placement::Fourth => self.fourth += 1,
        }
        self.total += 1;
    }
}

/// Placement counts, ranked by total top-4 finishes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlacementCounts {
    /// Sorted by total descending, then country name ascending
    pub ranking: Vec<CountryPlacements>,
}

impl PlacementCounts {
    /// Country axis order for the stacked figure.
    pub fn country_order(&self) -> Vec<&str> {
        self.ranking.iter().map(|c| c.country.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }
}

/// Count every country's appearances in each of the four placement slots.
pub fn placement_counts(store: &ReferenceStore) -> PlacementCounts {
    let mut by_country: BTreeMap<&str, CountryPlacements> = BTreeMap::new();

    for tournament in store.tournaments() {
        for (placement, country) in tournament.podium() {
            by_country
                .entry(country)
                .or_insert_with(|| CountryPlacements::new(country))
                .record(placement);
        }
    }

    // BTreeMap iteration is alphabetical, and sort_by is stable
    let mut ranking: Vec<CountryPlacements> = by_country.into_values().collect();
    ranking.sort_by(|a, b| b.total.cmp(&a.total));

    PlacementCounts { ranking }
}

//! Derived aggregators.
//!
//! Pure, deterministic functions over the [`ReferenceStore`]:
//! - Top-4 placement counts and country ranking
//! - Scorer and discipline leaderboards (all-time or one tournament)
//! - Team journeys and per-player stat lines
//! - Head-to-head records
//! - Per-entity country status for map colouring
//! - Per-year match goals and match listings
//!
//! [`ReferenceStore`]: crate::store::ReferenceStore

mod country_status;
mod head_to_head;
mod journey;
mod leaderboard;
mod matches;
mod placements;

pub use country_status::*;
pub use head_to_head::*;
pub use journey::*;
pub use leaderboard::*;
pub use matches::*;
pub use placements::*;

/// Calculate win rate from wins/losses/draws.
pub fn calculate_win_rate(wins: u32, losses: u32, draws: u32) -> f64 {
    let total = wins + losses + draws;
    if total == 0 {
        0.0
    } else {
        wins as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_win_rate() {
        assert!((calculate_win_rate(5, 1, 0) - 0.833).abs() < 0.01);
        assert_eq!(calculate_win_rate(0, 0, 0), 0.0);
        assert_eq!(calculate_win_rate(3, 3, 0), 0.5);
    }
}

//! Core data models for the dashboard.

mod match_record;
mod player_event;
mod tournament;

pub use match_record::*;
pub use player_event::*;
pub use tournament::*;

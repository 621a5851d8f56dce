//! # Cup Dashboard
//!
//! Interactive exploration of FIFA World Cup history (1930-2014).
//!
//! ## Architecture
//!
//! - **models**: Core records (tournaments, matches, player event codes)
//! - **storage**: CSV loading and text cleanup
//! - **lookup**: Country flag, map code and continent tables
//! - **store**: Read-only reference store with prebuilt indices
//! - **calculate**: Aggregations (placements, leaderboards, journeys, head-to-head, map status)
//! - **present**: Renderable panel content (tables, bar figures, choropleths)
//! - **session**: Selection state machine and live session registry
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod lookup;
pub mod models;
pub mod present;
pub mod session;
pub mod storage;
pub mod store;

pub use models::*;

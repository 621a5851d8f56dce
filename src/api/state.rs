use std::sync::Arc;

use chrono::Duration;

use crate::config::{AppConfig, MAX_SESSION_IDLE_MINUTES};
use crate::session::{DashboardSettings, SessionRegistry};
use crate::store::ReferenceStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReferenceStore>,
    pub sessions: SessionRegistry,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<ReferenceStore>, config: AppConfig) -> Self {
        let dashboard = &config.dashboard;
        let sessions = SessionRegistry::new(
            Arc::clone(&store),
            DashboardSettings {
                leaderboard_size: dashboard.leaderboard_size,
            },
            // chrono panics on out-of-range minutes
            Duration::minutes(dashboard.session_idle_minutes.clamp(1, MAX_SESSION_IDLE_MINUTES) as i64),
            dashboard.max_sessions,
        );

        Self {
            store,
            sessions,
            config: Arc::new(config),
        }
    }
}

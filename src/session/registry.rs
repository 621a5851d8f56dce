use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use super::{DashboardSettings, DashboardView, Session};
use crate::store::ReferenceStore;

/// A session plus the time it was last handed out.
#[derive(Debug)]
struct Entry {
    session: Arc<Mutex<Session>>,
    last_active: DateTime<Utc>,
}

/// Live sessions keyed by id.
///
/// Each session sits behind its own mutex so events for one session are
/// processed strictly in arrival order while other sessions proceed.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    store: Arc<ReferenceStore>,
    settings: DashboardSettings,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(
        store: Arc<ReferenceStore>,
        settings: DashboardSettings,
        idle_timeout: Duration,
        max_sessions: usize,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            store,
            settings,
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Open a session and return its id with the initial view.
    pub async fn create(&self) -> (Uuid, DashboardView) {
        self.create_at(Utc::now()).await
    }

    async fn create_at(&self, now: DateTime<Utc>) -> (Uuid, DashboardView) {
        let id = Uuid::new_v4();
        let session = Session::new(id, Arc::clone(&self.store), self.settings);
        let view = session.view().clone();

        let mut sessions = self.sessions.write().await;
        prune_idle(&mut sessions, now, self.idle_timeout);
        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_active)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            debug!(session = %oldest, "Evicted least recently used session");
        }
        sessions.insert(
            id,
            Entry {
                session: Arc::new(Mutex::new(session)),
                last_active: now,
            },
        );
        info!(session = %id, active = sessions.len(), "Created session");

        (id, view)
    }

    /// Look up a session and mark it active.
    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_active = Utc::now();
        Some(Arc::clone(&entry.session))
    }

    /// Returns true if the session existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session = %id, "Closed session");
        }
        removed
    }

    /// Drop sessions idle for longer than the timeout; returns how many went.
    pub async fn prune_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        prune_idle(&mut sessions, Utc::now(), self.idle_timeout)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn prune_idle(sessions: &mut HashMap<Uuid, Entry>, now: DateTime<Utc>, timeout: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, entry| now - entry.last_active <= timeout);
    let pruned = before - sessions.len();
    if pruned > 0 {
        debug!(pruned, "Pruned idle sessions");
    }
    pruned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ViewEvent;
    use crate::store::fixtures::shared_store;

    fn registry(max_sessions: usize) -> SessionRegistry {
        SessionRegistry::new(
            shared_store(),
            DashboardSettings::default(),
            Duration::minutes(60),
            max_sessions,
        )
    }

    #[tokio::test]
    async fn test_create_get_remove() {
        let registry = registry(10);
        let (id, view) = registry.create().await;
        assert_eq!(view.revision, 0);
        assert_eq!(registry.len().await, 1);

        let session = registry.get(id).await.unwrap();
        let transition = session.lock().await.handle(ViewEvent::SelectYear(1970));
        assert_eq!(transition.revision, 1);

        assert!(registry.remove(id).await);
        assert!(!registry.remove(id).await);
        assert!(registry.get(id).await.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let registry = registry(10);
        let (a, _) = registry.create().await;
        let (b, _) = registry.create().await;

        let session_a = registry.get(a).await.unwrap();
        session_a.lock().await.handle(ViewEvent::SelectYear(1998));

        let session_b = registry.get(b).await.unwrap();
        assert_eq!(session_b.lock().await.state().year(), None);
    }

    #[tokio::test]
    async fn test_evicts_least_recently_used() {
        let registry = registry(2);
        let start = Utc::now();
        let (first, _) = registry.create_at(start).await;
        let (second, _) = registry.create_at(start + Duration::seconds(1)).await;
        let (third, _) = registry.create_at(start + Duration::seconds(2)).await;

        assert_eq!(registry.len().await, 2);
        assert!(registry.get(first).await.is_none());
        assert!(registry.get(second).await.is_some());
        assert!(registry.get(third).await.is_some());
    }

    #[tokio::test]
    async fn test_prunes_idle_sessions() {
        let registry = registry(10);
        let (stale, _) = registry
            .create_at(Utc::now() - Duration::minutes(120))
            .await;
        let (fresh, _) = registry.create().await;

        // Creating `fresh` already swept the stale session
        assert!(registry.get(stale).await.is_none());
        assert!(registry.get(fresh).await.is_some());
        assert_eq!(registry.prune_idle().await, 0);
    }
}

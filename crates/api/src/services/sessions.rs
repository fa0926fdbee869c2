//! Registry of open planner sessions.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use domain::services::fetcher::DataFetcher;
use domain::services::notification::NotificationService;
use domain::services::planner::OccupancyPlanner;
use shared::{Language, MonthKey, Translator};
use tokio::sync::RwLock;
use uuid::Uuid;

/// One open session.
pub struct PlannerSession {
    pub id: Uuid,
    pub language: Language,
    pub planner: OccupancyPlanner,
}

#[derive(Default)]
struct Registry {
    sessions: HashMap<Uuid, Arc<PlannerSession>>,
    order: VecDeque<Uuid>,
}

/// Holds every open planner session. When full, the oldest session is
/// closed to make room.
pub struct SessionRegistry {
    fetcher: DataFetcher,
    notifier: Arc<dyn NotificationService>,
    max_sessions: usize,
    inner: RwLock<Registry>,
}

impl SessionRegistry {
    pub fn new(
        fetcher: DataFetcher,
        notifier: Arc<dyn NotificationService>,
        max_sessions: usize,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            max_sessions: max_sessions.max(1),
            inner: RwLock::new(Registry::default()),
        }
    }

    /// Opens a session showing `month`.
    pub async fn open(&self, month: MonthKey, language: Language) -> Arc<PlannerSession> {
        let session = Arc::new(PlannerSession {
            id: Uuid::new_v4(),
            language,
            planner: OccupancyPlanner::new(
                self.fetcher.clone(),
                self.notifier.clone(),
                Translator::new(language),
                month,
            ),
        });

        let mut inner = self.inner.write().await;
        while inner.sessions.len() >= self.max_sessions {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.sessions.remove(&oldest);
            tracing::info!(session_id = %oldest, "Evicted oldest planner session");
        }
        inner.sessions.insert(session.id, session.clone());
        inner.order.push_back(session.id);

        tracing::info!(
            session_id = %session.id,
            month = %month,
            language = %language,
            "Planner session opened"
        );
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<PlannerSession>> {
        self.inner.read().await.sessions.get(&id).cloned()
    }

    /// Closes a session. Returns whether it existed.
    pub async fn close(&self, id: Uuid) -> bool {
        let mut inner = self.inner.write().await;
        let removed = inner.sessions.remove(&id).is_some();
        if removed {
            inner.order.retain(|s| *s != id);
            tracing::info!(session_id = %id, "Planner session closed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

//! User-visible notices raised by planner moves.
//!
//! Notices are queued on the session for the UI and also handed to a
//! [`NotificationService`] so deployments can forward them elsewhere.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

impl std::fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoticeKind::Success => write!(f, "success"),
            NoticeKind::Error => write!(f, "error"),
        }
    }
}

/// Toast-style message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            description: None,
            reservation_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            description: None,
            reservation_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn for_reservation(mut self, reservation_id: impl Into<String>) -> Self {
        self.reservation_id = Some(reservation_id.into());
        self
    }
}

/// Result of a notification send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationResult {
    Sent,
    /// Sending failed. Never blocks the planner.
    Failed(String),
}

/// Sink for planner notices.
#[async_trait::async_trait]
pub trait NotificationService: Send + Sync {
    async fn notify(&self, notice: &Notice) -> NotificationResult;
}

/// Writes notices to the log.
#[derive(Debug, Clone, Default)]
pub struct LoggingNotificationService;

#[async_trait::async_trait]
impl NotificationService for LoggingNotificationService {
    async fn notify(&self, notice: &Notice) -> NotificationResult {
        match notice.kind {
            NoticeKind::Success => tracing::info!(
                title = %notice.title,
                reservation_id = ?notice.reservation_id,
                "Planner notice"
            ),
            NoticeKind::Error => tracing::warn!(
                title = %notice.title,
                description = ?notice.description,
                reservation_id = ?notice.reservation_id,
                "Planner error notice"
            ),
        }
        NotificationResult::Sent
    }
}

/// Mock notification service for testing.
///
/// Records every notice it receives.
#[derive(Debug, Default)]
pub struct MockNotificationService {
    /// Whether to simulate failures for testing.
    pub simulate_failure: bool,
    sent: Mutex<Vec<Notice>>,
}

impl MockNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service that simulates failures.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Notices received so far.
    pub fn sent(&self) -> Vec<Notice> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl NotificationService for MockNotificationService {
    async fn notify(&self, notice: &Notice) -> NotificationResult {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notice.clone());
        }
        if self.simulate_failure {
            tracing::warn!(title = %notice.title, "Mock notification service simulating failure");
            return NotificationResult::Failed("Simulated failure".to_string());
        }
        NotificationResult::Sent
    }
}

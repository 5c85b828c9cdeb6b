//! UseCase: Activity Log の取得

use std::sync::Arc;

use crate::domain::{ActivityEntry, ActivityLogRepository, Session};

use super::broadcast::BroadcastEngine;

/// Activity Log 取得のユースケース
pub struct GetActivityLogUseCase {
    engine: Arc<BroadcastEngine>,
    activity_log: Arc<dyn ActivityLogRepository>,
}

impl GetActivityLogUseCase {
    pub fn new(engine: Arc<BroadcastEngine>, activity_log: Arc<dyn ActivityLogRepository>) -> Self {
        Self {
            engine,
            activity_log,
        }
    }

    /// getLogs の要求元にだけスナップショットを送る
    pub async fn execute(&self, requester: &Session) {
        let count = self.engine.deliver_activity_snapshot(requester).await;
        tracing::debug!(
            "Sent {} activity entries to '{}'",
            count,
            requester.display_name
        );
    }

    /// HTTP API 用のスナップショット
    pub async fn snapshot(&self) -> Vec<ActivityEntry> {
        self.activity_log.snapshot().await
    }
}

//! InMemory Activity Log 実装

use std::sync::Arc;

use async_trait::async_trait;
use hiroba_shared::time::Clock;

use crate::domain::{ActivityDraft, ActivityEntry, ActivityLogRepository, Timestamp};

use super::append_log::AppendOnlyLog;

/// インメモリの Activity Log
///
/// History Store とは独立した台帳で、両者を突き合わせることはしません。
pub struct InMemoryActivityLog {
    log: AppendOnlyLog<ActivityEntry>,
    clock: Arc<dyn Clock>,
}

impl InMemoryActivityLog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            log: AppendOnlyLog::new(),
            clock,
        }
    }
}

#[async_trait]
impl ActivityLogRepository for InMemoryActivityLog {
    async fn append(&self, draft: ActivityDraft) -> ActivityEntry {
        self.log
            .append_with(|_| draft.stamp(Timestamp::new(self.clock.now_millis())))
            .await
    }

    async fn snapshot(&self) -> Vec<ActivityEntry> {
        self.log.snapshot().await
    }
}

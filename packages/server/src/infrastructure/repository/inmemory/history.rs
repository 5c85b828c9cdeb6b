//! InMemory History Store 実装

use std::sync::Arc;

use async_trait::async_trait;
use hiroba_shared::time::Clock;

use crate::domain::{ChatRecord, ChatRecordDraft, HistoryRepository, RecordId, Timestamp};

use super::append_log::AppendOnlyLog;

/// インメモリの History Store
///
/// レコードの ID と時刻はここで一元的に付与します。
pub struct InMemoryHistoryStore {
    log: AppendOnlyLog<ChatRecord>,
    clock: Arc<dyn Clock>,
}

impl InMemoryHistoryStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            log: AppendOnlyLog::new(),
            clock,
        }
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryStore {
    async fn append(&self, draft: ChatRecordDraft) -> ChatRecord {
        self.log
            .append_with(|_| {
                draft.stamp(
                    RecordId::generate(),
                    Timestamp::new(self.clock.now_millis()),
                )
            })
            .await
    }

    async fn snapshot(&self) -> Vec<ChatRecord> {
        self.log.snapshot().await
    }
}

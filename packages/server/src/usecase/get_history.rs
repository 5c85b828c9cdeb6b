//! UseCase: チャット履歴の取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{ChatRecord, HistoryRepository};

/// 履歴取得のユースケース
pub struct GetHistoryUseCase {
    history: Arc<dyn HistoryRepository>,
}

impl GetHistoryUseCase {
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    pub async fn execute(&self) -> Vec<ChatRecord> {
        self.history.snapshot().await
    }
}

//! UseCase: 接続中セッションの取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{Session, SessionRegistry};

/// 接続中セッション一覧取得のユースケース
pub struct GetSessionsUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl GetSessionsUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続順のセッション一覧
    pub async fn execute(&self) -> Vec<Session> {
        self.registry.all().await
    }
}

//! InMemory Session Registry 実装
//!
//! ドメイン層が定義する SessionRegistry trait の具体的な実装。
//! 接続順を保つため Vec をインメモリストアとして使用します（単一ルームなので線形探索で十分）。

use std::sync::Arc;

use async_trait::async_trait;
use hiroba_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, DisplayName, PusherChannel, RegistryError, Session, SessionRegistry, Timestamp,
};

/// インメモリ Session Registry 実装
pub struct InMemorySessionRegistry {
    /// 登録中のセッション（接続順）
    sessions: Mutex<Vec<Session>>,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionRegistry {
    /// 新しい InMemorySessionRegistry を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
            clock,
        }
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn register(
        &self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        channel: PusherChannel,
    ) -> Result<Session, RegistryError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.iter().any(|s| s.id == connection_id) {
            return Err(RegistryError::DuplicateConnection(connection_id.into_string()));
        }

        let session = Session::new(
            connection_id,
            display_name,
            Timestamp::new(self.clock.now_millis()),
            channel,
        );
        sessions.push(session.clone());
        tracing::debug!(
            "Session '{}' ({}) registered",
            session.id,
            session.display_name
        );
        Ok(session)
    }

    async fn deregister(&self, connection_id: &ConnectionId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let position = sessions.iter().position(|s| &s.id == connection_id)?;
        let session = sessions.remove(position);
        tracing::debug!("Session '{}' deregistered", connection_id);
        Some(session)
    }

    async fn all(&self) -> Vec<Session> {
        self.sessions.lock().await.clone()
    }

    async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

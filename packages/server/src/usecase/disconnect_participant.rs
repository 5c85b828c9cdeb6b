//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 削除 → 退室通知 の処理と、重複した切断通知の扱い
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と残りの参加者への通知
//! - エッジケース：同じセッションの二重切断（2 回目は何もしない）

use std::sync::Arc;

use crate::domain::{ChatRecord, ConnectionId};

use super::broadcast::BroadcastEngine;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    engine: Arc<BroadcastEngine>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(engine: Arc<BroadcastEngine>) -> Self {
        Self { engine }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(ChatRecord)` - 退室通知のレコード
    /// * `None` - 既に削除済みだった（通知は行わない）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<ChatRecord> {
        let turn = self.engine.begin().await;
        let Some(session) = turn.deregister(connection_id).await else {
            tracing::debug!("Session '{}' was already removed", connection_id);
            return None;
        };
        let record = turn.announce_leave(&session).await;

        tracing::info!("'{}' ({}) left", session.display_name, session.id);
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ActivityKind, ActivityLogRepository, HistoryRepository, SessionRegistry},
        infrastructure::dto::websocket::ServerMessage,
        usecase::{
            ConnectParticipantUseCase,
            test_support::{create_harness, display_name, drain},
        },
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_disconnect_notifies_remaining_participants() {
        // テスト項目: 切断すると残りの参加者に退室通知が届く
        // given (前提条件):
        let harness = create_harness();
        let connect = ConnectParticipantUseCase::new(harness.engine.clone(), display_name("Anonymous"));
        let usecase = DisconnectParticipantUseCase::new(harness.engine.clone());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = connect.execute(Some("Alice".to_string()), tx1).await.unwrap();
        connect.execute(Some("Bob".to_string()), tx2).await.unwrap();
        drain(&mut rx2);

        // when (操作):
        let result = usecase.execute(&alice.id).await;

        // then (期待する結果):
        assert_eq!(
            result.map(|r| r.body.into_string()),
            Some("Alice has left the chat.".to_string())
        );
        assert_eq!(harness.registry.count().await, 1);
        assert!(matches!(
            &drain(&mut rx2)[..],
            [ServerMessage::NewRecord(r)] if r.message == "Alice has left the chat."
        ));
    }

    #[tokio::test]
    async fn test_disconnect_twice_is_a_noop() {
        // テスト項目: 二重の切断通知では 2 回目に何も追記・通知しない
        // given (前提条件):
        let harness = create_harness();
        let connect = ConnectParticipantUseCase::new(harness.engine.clone(), display_name("Anonymous"));
        let usecase = DisconnectParticipantUseCase::new(harness.engine.clone());
        let (tx, _rx) = mpsc::unbounded_channel();
        let alice = connect.execute(Some("Alice".to_string()), tx).await.unwrap();
        usecase.execute(&alice.id).await;
        let history_len = harness.history.snapshot().await.len();

        // when (操作):
        let result = usecase.execute(&alice.id).await;

        // then (期待する結果):
        assert!(result.is_none());
        assert_eq!(harness.history.snapshot().await.len(), history_len);
        let leaves = harness
            .activity_log
            .snapshot()
            .await
            .into_iter()
            .filter(|e| e.kind == ActivityKind::Leave)
            .count();
        assert_eq!(leaves, 1);
    }
}

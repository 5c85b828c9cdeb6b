//! Broadcast Engine
//!
//! ChatRecord の追記と全セッションへのファンアウトを 1 つの「公開ターン」の中で行います。
//! ターンはエンジンの sequencer を保持している間だけ存在するため、
//!
//! - 追記順 = 各セッションへの配送順
//! - 登録 + 履歴スナップショット送信が、他のターンの追記と交差しない
//!
//! が保証されます。配送はセッションごとのチャンネルへの非ブロッキング送信で、
//! 失敗はログに残すだけで残りの配送を続けます。

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{
    ActivityDraft, ActivityLogRepository, ChatRecord, ChatRecordDraft, ConnectionId, DisplayName,
    HistoryRepository, MessageBody, MessagePusher, PusherChannel, RegistryError, ServerEvent,
    Session, SessionRegistry,
};

use super::error::SendMessageError;

/// 追記とファンアウトを直列化するエンジン
pub struct BroadcastEngine {
    registry: Arc<dyn SessionRegistry>,
    history: Arc<dyn HistoryRepository>,
    activity_log: Arc<dyn ActivityLogRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Mutex<()>,
}

impl BroadcastEngine {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        history: Arc<dyn HistoryRepository>,
        activity_log: Arc<dyn ActivityLogRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            history,
            activity_log,
            message_pusher,
            sequencer: Mutex::new(()),
        }
    }

    /// 公開ターンを開始する（他のターンが終わるまで待つ）
    pub async fn begin(&self) -> PublishTurn<'_> {
        PublishTurn {
            engine: self,
            _guard: self.sequencer.lock().await,
        }
    }

    /// メッセージを中継する（単独のターンで実行）
    pub async fn relay_message(
        &self,
        session: &Session,
        body: String,
    ) -> Result<ChatRecord, SendMessageError> {
        self.begin().await.relay_message(session, body).await
    }

    /// Activity Log のスナップショットを要求元にだけ送る
    ///
    /// 送ったエントリ数を返します。
    pub async fn deliver_activity_snapshot(&self, session: &Session) -> usize {
        let entries = self.activity_log.snapshot().await;
        let count = entries.len();
        if let Err(e) = self
            .message_pusher
            .push_to(session, &ServerEvent::LogsData(entries))
            .await
        {
            tracing::warn!("Failed to deliver activity log: {}", e);
        }
        count
    }
}

/// 公開ターン
///
/// 生存中はエンジンの sequencer を保持します。ChatRecord を追記してファンアウトする操作と、
/// それと一貫させる必要のある登録・削除はこの型の上でのみ行います。
pub struct PublishTurn<'a> {
    engine: &'a BroadcastEngine,
    _guard: MutexGuard<'a, ()>,
}

impl PublishTurn<'_> {
    /// セッションを登録する（以降のファンアウト対象になる）
    pub async fn register(
        &self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        channel: PusherChannel,
    ) -> Result<Session, RegistryError> {
        self.engine
            .registry
            .register(connection_id, display_name, channel)
            .await
    }

    /// セッションを削除する（既に無ければ `None`）
    pub async fn deregister(&self, connection_id: &ConnectionId) -> Option<Session> {
        self.engine.registry.deregister(connection_id).await
    }

    /// 履歴のスナップショットを対象セッションにだけ送る
    ///
    /// 送ったレコード数を返します。
    pub async fn deliver_history_snapshot(&self, session: &Session) -> usize {
        let records = self.engine.history.snapshot().await;
        let count = records.len();
        if let Err(e) = self
            .engine
            .message_pusher
            .push_to(session, &ServerEvent::History(records))
            .await
        {
            tracing::warn!("Failed to deliver history: {}", e);
        }
        count
    }

    /// 入室通知を追記し、新しいセッションを含む全員に配送する
    pub async fn announce_join(&self, session: &Session) -> ChatRecord {
        let record = self
            .engine
            .history
            .append(ChatRecordDraft::joined(&session.display_name))
            .await;
        self.engine
            .activity_log
            .append(ActivityDraft::joined(session))
            .await;
        self.publish(record).await
    }

    /// ユーザーのメッセージを追記し、全員に配送する
    ///
    /// 空・空白のみの本文は何も追記・配送せずに `EmptyMessage` を返します。
    pub async fn relay_message(
        &self,
        session: &Session,
        body: String,
    ) -> Result<ChatRecord, SendMessageError> {
        let body = MessageBody::new(body).map_err(|_| SendMessageError::EmptyMessage)?;

        let record = self
            .engine
            .history
            .append(ChatRecordDraft::user(
                session.display_name.clone(),
                body.clone(),
            ))
            .await;
        self.engine
            .activity_log
            .append(ActivityDraft::message_sent(
                session.display_name.clone(),
                body,
            ))
            .await;
        Ok(self.publish(record).await)
    }

    /// 退室通知を追記し、残っている全員に配送する
    ///
    /// 呼び出し前にセッションは削除されている想定です。
    pub async fn announce_leave(&self, session: &Session) -> ChatRecord {
        let record = self
            .engine
            .history
            .append(ChatRecordDraft::left(&session.display_name))
            .await;
        self.engine
            .activity_log
            .append(ActivityDraft::left(session))
            .await;
        self.publish(record).await
    }

    /// 現時点の登録セッション全員へ配送
    async fn publish(&self, record: ChatRecord) -> ChatRecord {
        let targets = self.engine.registry.all().await;
        let event = ServerEvent::NewRecord(record.clone());
        if let Err(e) = self.engine.message_pusher.broadcast(&targets, &event).await {
            tracing::warn!("Failed to broadcast record: {}", e);
        }
        record
    }
}

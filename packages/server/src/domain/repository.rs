//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! いずれの操作もインメモリで完結し、短時間で終わることを前提とします。

use async_trait::async_trait;

use super::{
    ActivityDraft, ActivityEntry, ChatRecord, ChatRecordDraft, ConnectionId, DisplayName,
    PusherChannel, RegistryError, Session,
};

/// Session Registry trait
///
/// 接続中のセッションを保持します。`all()` はある時点の一貫したスナップショットを返します。
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// セッションを登録（接続時刻は Registry が付与）
    async fn register(
        &self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        channel: PusherChannel,
    ) -> Result<Session, RegistryError>;

    /// セッションを削除
    ///
    /// 既に存在しない場合は何もせず `None` を返す（重複した切断通知を許容）
    async fn deregister(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// 登録中の全セッションのスナップショット（接続順）
    async fn all(&self) -> Vec<Session>;

    /// 登録中のセッション数
    async fn count(&self) -> usize;
}

/// History Store trait（ChatRecord の追記専用ログ）
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// 末尾に追記し、ID と時刻が付与されたレコードを返す
    async fn append(&self, draft: ChatRecordDraft) -> ChatRecord;

    /// 追記順のスナップショット
    async fn snapshot(&self) -> Vec<ChatRecord>;
}

/// Activity Log trait（ActivityEntry の追記専用ログ）
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// 末尾に追記し、時刻が付与されたエントリを返す
    async fn append(&self, draft: ActivityDraft) -> ActivityEntry;

    /// 追記順のスナップショット
    async fn snapshot(&self) -> Vec<ActivityEntry>;
}

//! MessagePusher trait 定義
//!
//! クライアントへのイベント送信のインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{entity::ServerEvent, entity::Session, error::MessagePushError};

/// セッションへの送信チャンネル
///
/// 送信は非ブロッキングで、受信側（WebSocket writer タスク）が順に書き出します。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// ## 配送の方針
///
/// - `push_to`: 単一セッションへの送信。失敗は呼び出し元へ返す
/// - `broadcast`: 全対象への送信。個別の失敗はログに残し、残りの配送を続ける
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 特定のセッションにイベントを送信
    async fn push_to(&self, target: &Session, event: &ServerEvent)
    -> Result<(), MessagePushError>;

    /// 複数のセッションにイベントを送信し、届いた件数を返す
    async fn broadcast(
        &self,
        targets: &[Session],
        event: &ServerEvent,
    ) -> Result<usize, MessagePushError>;
}

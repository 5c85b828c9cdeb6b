//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - ドメインの `ServerEvent` をワイヤーフォーマット（JSON）に変換
//! - 各セッションの `PusherChannel` へ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket 自体は UI 層（`src/ui/handler/websocket.rs`）が所有し、チャンネルの受信側を
//! writer タスクで書き出します。この実装はチャンネルの送信側に書き込むだけなので、
//! 遅いクライアントや切断済みのクライアントが他の配送を止めることはありません。

use async_trait::async_trait;

use crate::domain::{MessagePushError, MessagePusher, ServerEvent, Session};
use crate::infrastructure::dto::websocket::ServerMessage;

/// WebSocket を使った MessagePusher 実装
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketMessagePusher;

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self
    }

    /// イベントを JSON 文字列に変換
    fn encode(event: &ServerEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerMessage::from(event.clone()))
            .map_err(|e| MessagePushError::Encode(e.to_string()))
    }

    fn send(target: &Session, payload: String) -> Result<(), MessagePushError> {
        target
            .channel
            .send(payload)
            .map_err(|_| MessagePushError::PushFailed(target.id.as_str().to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn push_to(
        &self,
        target: &Session,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let payload = Self::encode(event)?;
        Self::send(target, payload)?;
        tracing::debug!("Pushed '{}' to session '{}'", event.name(), target.id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[Session],
        event: &ServerEvent,
    ) -> Result<usize, MessagePushError> {
        let payload = Self::encode(event)?;

        let mut delivered = 0;
        for target in targets {
            // ブロードキャストでは一部の送信失敗を許容
            match Self::send(target, payload.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("{}", e),
            }
        }
        tracing::debug!(
            "Broadcasted '{}' to {}/{} sessions",
            event.name(),
            delivered,
            targets.len()
        );

        Ok(delivered)
    }
}

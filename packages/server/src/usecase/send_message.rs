//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージの追記とブロードキャスト
//! - 異常系：空メッセージ（黙って破棄）
//! - エッジケース：送信者のみが接続している場合

use std::sync::Arc;

use crate::domain::{ChatRecord, Session};

use super::{broadcast::BroadcastEngine, error::SendMessageError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    engine: Arc<BroadcastEngine>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(engine: Arc<BroadcastEngine>) -> Self {
        Self { engine }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信者のセッション
    /// * `body` - クライアントから届いた本文（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatRecord)` - 追記・配送されたレコード
    /// * `Err(SendMessageError::EmptyMessage)` - 空の本文のため破棄された
    pub async fn execute(
        &self,
        sender: &Session,
        body: String,
    ) -> Result<ChatRecord, SendMessageError> {
        let record = self.engine.relay_message(sender, body).await?;
        tracing::debug!(
            "Relayed message {} from '{}': {}",
            record.id,
            sender.display_name,
            record.body.as_str()
        );
        Ok(record)
    }
}

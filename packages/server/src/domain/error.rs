//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクト生成時のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("ConnectionId must not be empty")]
    ConnectionIdEmpty,

    #[error("DisplayName must not be empty")]
    DisplayNameEmpty,

    #[error("MessageBody must not be empty or whitespace-only")]
    MessageBodyEmpty,
}

/// Session Registry のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// 同じ connection id のセッションが既に登録されている（論理エラー）
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// メッセージ送信（push）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先チャンネルが既に閉じている
    #[error("Failed to push message to '{0}': channel closed")]
    PushFailed(String),

    /// イベントのシリアライズに失敗
    #[error("Failed to encode event: {0}")]
    Encode(String),
}

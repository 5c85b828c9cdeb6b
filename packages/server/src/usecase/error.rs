//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::RegistryError;

/// 参加者接続のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 発行した connection id が既に使われていた（通常は起こらない）
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),
}

impl From<RegistryError> for ConnectError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::DuplicateConnection(id) => Self::DuplicateConnection(id),
        }
    }
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// 空・空白のみの本文（黙って破棄される）
    #[error("Message body is empty")]
    EmptyMessage,
}

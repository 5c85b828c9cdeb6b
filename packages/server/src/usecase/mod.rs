//! UseCase 層
//!
//! - `BroadcastEngine`: 追記とファンアウトを直列化する中核
//! - 接続ライフサイクルの各遷移に対応するユースケース
//! - HTTP から使う読み取り専用のユースケース

mod broadcast;
mod connect_participant;
mod disconnect_participant;
mod error;
mod get_activity_log;
mod get_history;
mod get_sessions;
mod send_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use broadcast::{BroadcastEngine, PublishTurn};
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, SendMessageError};
pub use get_activity_log::GetActivityLogUseCase;
pub use get_history::GetHistoryUseCase;
pub use get_sessions::GetSessionsUseCase;
pub use send_message::SendMessageUseCase;

//! Server state shared by all handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetActivityLogUseCase,
    GetHistoryUseCase, GetSessionsUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetActivityLogUseCase（Activity Log 取得のユースケース）
    pub get_activity_log_usecase: Arc<GetActivityLogUseCase>,
    /// GetHistoryUseCase（履歴取得のユースケース）
    pub get_history_usecase: Arc<GetHistoryUseCase>,
    /// GetSessionsUseCase（接続中セッション取得のユースケース）
    pub get_sessions_usecase: Arc<GetSessionsUseCase>,
}

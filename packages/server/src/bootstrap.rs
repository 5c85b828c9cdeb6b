//! Dependency wiring.

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::{
    config::ServerConfig,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryActivityLog, InMemoryHistoryStore, InMemorySessionRegistry},
    },
    ui::Server,
    usecase::{
        BroadcastEngine, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        GetActivityLogUseCase, GetHistoryUseCase, GetSessionsUseCase, SendMessageUseCase,
    },
};

/// Build a server backed by fresh in-memory stores.
///
/// Dependencies are created in order:
/// 1. Repositories (session registry, history store, activity log)
/// 2. MessagePusher
/// 3. Broadcast engine
/// 4. UseCases
/// 5. Server
pub fn build_server(config: &ServerConfig, clock: Arc<dyn Clock>) -> Server {
    // 1. Repositories
    let registry = Arc::new(InMemorySessionRegistry::new(clock.clone()));
    let history = Arc::new(InMemoryHistoryStore::new(clock.clone()));
    let activity_log = Arc::new(InMemoryActivityLog::new(clock));

    // 2. MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Broadcast engine
    let engine = Arc::new(BroadcastEngine::new(
        registry.clone(),
        history.clone(),
        activity_log.clone(),
        message_pusher,
    ));

    // 4. UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        engine.clone(),
        config.default_nickname.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(engine.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(engine.clone()));
    let get_activity_log_usecase = Arc::new(GetActivityLogUseCase::new(engine, activity_log));
    let get_history_usecase = Arc::new(GetHistoryUseCase::new(history));
    let get_sessions_usecase = Arc::new(GetSessionsUseCase::new(registry));

    // 5. Server
    Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        send_message_usecase,
        get_activity_log_usecase,
        get_history_usecase,
        get_sessions_usecase,
    )
}

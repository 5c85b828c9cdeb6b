//! ユースケースのテスト用ヘルパー

use std::sync::Arc;

use hiroba_shared::time::SteppingClock;
use tokio::sync::mpsc;

use crate::{
    domain::{DisplayName, MessagePusher},
    infrastructure::{
        dto::websocket::ServerMessage,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryActivityLog, InMemoryHistoryStore, InMemorySessionRegistry},
    },
};

use super::BroadcastEngine;

/// インメモリ実装で組み立てた Broadcast Engine と、検証用のストア参照
pub(crate) struct Harness {
    pub engine: Arc<BroadcastEngine>,
    pub registry: Arc<InMemorySessionRegistry>,
    pub history: Arc<InMemoryHistoryStore>,
    pub activity_log: Arc<InMemoryActivityLog>,
}

pub(crate) fn create_harness() -> Harness {
    create_harness_with_pusher(Arc::new(WebSocketMessagePusher::new()))
}

pub(crate) fn create_harness_with_pusher(message_pusher: Arc<dyn MessagePusher>) -> Harness {
    let clock = Arc::new(SteppingClock::new(1_700_000_000_000, 1));
    let registry = Arc::new(InMemorySessionRegistry::new(clock.clone()));
    let history = Arc::new(InMemoryHistoryStore::new(clock.clone()));
    let activity_log = Arc::new(InMemoryActivityLog::new(clock));
    let engine = Arc::new(BroadcastEngine::new(
        registry.clone(),
        history.clone(),
        activity_log.clone(),
        message_pusher,
    ));
    Harness {
        engine,
        registry,
        history,
        activity_log,
    }
}

pub(crate) fn display_name(value: &str) -> DisplayName {
    DisplayName::new(value.to_string()).unwrap()
}

/// チャンネルに溜まっているイベントを全て取り出してパースする
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(text) = rx.try_recv() {
        messages.push(serde_json::from_str(&text).unwrap());
    }
    messages
}

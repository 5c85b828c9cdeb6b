//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::{
        http::SessionDto,
        websocket::{ActivityEntryDto, ChatRecordDto},
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current chat history
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<ChatRecordDto>> {
    let records = state.get_history_usecase.execute().await;
    Json(records.into_iter().map(Into::into).collect())
}

/// Current activity log
pub async fn get_logs(State(state): State<Arc<AppState>>) -> Json<Vec<ActivityEntryDto>> {
    let entries = state.get_activity_log_usecase.snapshot().await;
    Json(entries.into_iter().map(Into::into).collect())
}

/// Connected sessions
pub async fn get_sessions(State(state): State<Arc<AppState>>) -> Json<Vec<SessionDto>> {
    let sessions = state.get_sessions_usecase.execute().await;
    Json(sessions.into_iter().map(Into::into).collect())
}

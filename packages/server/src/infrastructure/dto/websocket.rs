//! WebSocket message DTOs.
//!
//! Every text frame is an envelope `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Wire value of `ChatRecord.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    User,
    System,
}

/// Wire shape of a chat record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecordDto {
    pub id: String,
    pub r#type: RecordType,
    pub nickname: String,
    pub message: String,
    /// ISO-8601 (UTC, milliseconds)
    pub timestamp: String,
}

/// Wire value of `ActivityEntry.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    UserJoin,
    UserLeave,
    MessageSent,
}

/// Wire shape of an activity log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntryDto {
    pub r#type: ActivityType,
    pub nickname: String,
    /// ISO-8601 (UTC, milliseconds)
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_id: Option<String>,
}

/// Server → client events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    History(Vec<ChatRecordDto>),
    NewRecord(ChatRecordDto),
    LogsData(Vec<ActivityEntryDto>),
}

/// Client → server events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    SendMessage(String),
    GetLogs,
}

//! Conversion logic between DTOs and domain entities.
//!
//! Only the domain → DTO direction exists: records and entries are created
//! by the stores, never reconstructed from the wire.

use hiroba_shared::time::timestamp_to_iso8601;

use crate::domain::{
    ActivityEntry, ActivityKind, ChatRecord, RecordKind, ServerEvent, Session,
};
use crate::infrastructure::dto::{http, websocket as dto};

impl From<RecordKind> for dto::RecordType {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::User => Self::User,
            RecordKind::System => Self::System,
        }
    }
}

impl From<ActivityKind> for dto::ActivityType {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Join => Self::UserJoin,
            ActivityKind::Leave => Self::UserLeave,
            ActivityKind::MessageSent => Self::MessageSent,
        }
    }
}

impl From<ChatRecord> for dto::ChatRecordDto {
    fn from(record: ChatRecord) -> Self {
        Self {
            id: record.id.to_string(),
            r#type: record.kind.into(),
            nickname: record.display_name.into_string(),
            message: record.body.into_string(),
            timestamp: timestamp_to_iso8601(record.created_at.value()),
        }
    }
}

impl From<ActivityEntry> for dto::ActivityEntryDto {
    fn from(entry: ActivityEntry) -> Self {
        Self {
            r#type: entry.kind.into(),
            nickname: entry.display_name.into_string(),
            timestamp: timestamp_to_iso8601(entry.created_at.value()),
            message: entry.body.map(|body| body.into_string()),
            socket_id: entry.connection_id.map(|id| id.into_string()),
        }
    }
}

impl From<ServerEvent> for dto::ServerMessage {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::History(records) => {
                Self::History(records.into_iter().map(Into::into).collect())
            }
            ServerEvent::NewRecord(record) => Self::NewRecord(record.into()),
            ServerEvent::LogsData(entries) => {
                Self::LogsData(entries.into_iter().map(Into::into).collect())
            }
        }
    }
}

impl From<Session> for http::SessionDto {
    fn from(session: Session) -> Self {
        Self {
            connection_id: session.id.into_string(),
            nickname: session.display_name.into_string(),
            connected_at: timestamp_to_iso8601(session.connected_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ActivityDraft, ChatRecordDraft, ConnectionId, DisplayName, MessageBody, RecordId,
        Timestamp,
    };
    use tokio::sync::mpsc;

    #[test]
    fn test_domain_chat_record_to_dto() {
        // テスト項目: ドメインの ChatRecord が DTO に変換される
        // given (前提条件):
        let record = ChatRecordDraft::user(
            DisplayName::new("Alice".to_string()).unwrap(),
            MessageBody::new("hello".to_string()).unwrap(),
        )
        .stamp(RecordId::generate(), Timestamp::new(1672531200000));
        let id = record.id.to_string();

        // when (操作):
        let dto_record: dto::ChatRecordDto = record.into();

        // then (期待する結果):
        assert_eq!(dto_record.id, id);
        assert_eq!(dto_record.r#type, dto::RecordType::User);
        assert_eq!(dto_record.nickname, "Alice");
        assert_eq!(dto_record.message, "hello");
        assert_eq!(dto_record.timestamp, "2023-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_domain_activity_entry_to_dto() {
        // テスト項目: Leave エントリは USER_LEAVE と socketId を持つ DTO になる
        // given (前提条件):
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = Session::new(
            ConnectionId::new("conn-9".to_string()).unwrap(),
            DisplayName::new("Bob".to_string()).unwrap(),
            Timestamp::new(0),
            tx,
        );
        let entry = ActivityDraft::left(&session).stamp(Timestamp::new(1000));

        // when (操作):
        let dto_entry: dto::ActivityEntryDto = entry.into();

        // then (期待する結果):
        assert_eq!(dto_entry.r#type, dto::ActivityType::UserLeave);
        assert_eq!(dto_entry.nickname, "Bob");
        assert_eq!(dto_entry.socket_id.as_deref(), Some("conn-9"));
        assert!(dto_entry.message.is_none());
    }

    #[test]
    fn test_server_event_to_message_keeps_order() {
        // テスト項目: history イベントはレコードの順序を保って変換される
        // given (前提条件):
        let alice = DisplayName::new("Alice".to_string()).unwrap();
        let records = vec![
            ChatRecordDraft::joined(&alice).stamp(RecordId::generate(), Timestamp::new(1)),
            ChatRecordDraft::left(&alice).stamp(RecordId::generate(), Timestamp::new(2)),
        ];

        // when (操作):
        let message: dto::ServerMessage = ServerEvent::History(records).into();

        // then (期待する結果):
        match message {
            dto::ServerMessage::History(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].message, "Alice has joined the chat.");
                assert_eq!(records[1].message, "Alice has left the chat.");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}

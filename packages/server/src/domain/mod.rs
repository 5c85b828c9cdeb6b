//! ドメイン層
//!
//! チャットリレーのビジネスルールを表現する値オブジェクト・エンティティと、
//! 外部層が実装するインターフェース（trait）を定義します。

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    ActivityDraft, ActivityEntry, ActivityKind, ChatRecord, ChatRecordDraft, ConnectionPhase,
    RecordKind, ServerEvent, Session,
};
pub use error::{MessagePushError, RegistryError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::{ActivityLogRepository, HistoryRepository, SessionRegistry};
pub use value_object::{ConnectionId, DisplayName, MessageBody, RecordId, Timestamp};

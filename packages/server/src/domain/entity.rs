//! エンティティ
//!
//! - `Session`: Session Registry が保持する接続 1 件分の情報
//! - `ChatRecord`: 全クライアントに見えるチャット行・システム通知
//! - `ActivityEntry`: 明示的なログ要求でのみ返される監査エントリ
//!
//! `ChatRecord` / `ActivityEntry` は生成後に変更されません。ID と時刻は
//! ストアが追記時に付与するため、呼び出し側は `*Draft` を渡します。

use super::{
    message_pusher::PusherChannel,
    value_object::{ConnectionId, DisplayName, MessageBody, RecordId, Timestamp},
};

/// 接続中のセッション
#[derive(Debug, Clone)]
pub struct Session {
    pub id: ConnectionId,
    pub display_name: DisplayName,
    pub connected_at: Timestamp,
    /// このセッションへの送信チャンネル（WebSocket writer タスクに繋がる）
    pub channel: PusherChannel,
}

impl Session {
    pub fn new(
        id: ConnectionId,
        display_name: DisplayName,
        connected_at: Timestamp,
        channel: PusherChannel,
    ) -> Self {
        Self {
            id,
            display_name,
            connected_at,
            channel,
        }
    }
}

/// ChatRecord の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    User,
    System,
}

/// 履歴に追記されたチャットレコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRecord {
    pub id: RecordId,
    pub kind: RecordKind,
    pub display_name: DisplayName,
    pub body: MessageBody,
    pub created_at: Timestamp,
}

/// 追記前の ChatRecord（ID と時刻が未確定）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRecordDraft {
    pub kind: RecordKind,
    pub display_name: DisplayName,
    pub body: MessageBody,
}

impl ChatRecordDraft {
    pub fn user(display_name: DisplayName, body: MessageBody) -> Self {
        Self {
            kind: RecordKind::User,
            display_name,
            body,
        }
    }

    /// "{name} has joined the chat."
    pub fn joined(display_name: &DisplayName) -> Self {
        Self::system(format!("{} has joined the chat.", display_name))
    }

    /// "{name} has left the chat."
    pub fn left(display_name: &DisplayName) -> Self {
        Self::system(format!("{} has left the chat.", display_name))
    }

    fn system(text: String) -> Self {
        Self {
            kind: RecordKind::System,
            display_name: DisplayName::system(),
            body: MessageBody::notice(text),
        }
    }

    pub fn stamp(self, id: RecordId, created_at: Timestamp) -> ChatRecord {
        ChatRecord {
            id,
            kind: self.kind,
            display_name: self.display_name,
            body: self.body,
            created_at,
        }
    }
}

/// ActivityEntry の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Join,
    Leave,
    MessageSent,
}

/// Activity Log に追記された監査エントリ
///
/// `body` は MessageSent のときのみ、`connection_id` は Join / Leave のときのみ存在します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub display_name: DisplayName,
    pub created_at: Timestamp,
    pub body: Option<MessageBody>,
    pub connection_id: Option<ConnectionId>,
}

/// 追記前の ActivityEntry（時刻が未確定）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDraft {
    pub kind: ActivityKind,
    pub display_name: DisplayName,
    pub body: Option<MessageBody>,
    pub connection_id: Option<ConnectionId>,
}

impl ActivityDraft {
    pub fn joined(session: &Session) -> Self {
        Self {
            kind: ActivityKind::Join,
            display_name: session.display_name.clone(),
            body: None,
            connection_id: Some(session.id.clone()),
        }
    }

    pub fn left(session: &Session) -> Self {
        Self {
            kind: ActivityKind::Leave,
            display_name: session.display_name.clone(),
            body: None,
            connection_id: Some(session.id.clone()),
        }
    }

    pub fn message_sent(display_name: DisplayName, body: MessageBody) -> Self {
        Self {
            kind: ActivityKind::MessageSent,
            display_name,
            body: Some(body),
            connection_id: None,
        }
    }

    pub fn stamp(self, created_at: Timestamp) -> ActivityEntry {
        ActivityEntry {
            kind: self.kind,
            display_name: self.display_name,
            created_at,
            body: self.body,
            connection_id: self.connection_id,
        }
    }
}

/// サーバーからクライアントへ送るイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// 接続直後に 1 度だけ、接続したクライアントへ
    History(Vec<ChatRecord>),
    /// ChatRecord が追記されるたびに全クライアントへ
    NewRecord(ChatRecord),
    /// getLogs への応答として要求元へ
    LogsData(Vec<ActivityEntry>),
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::History(_) => "history",
            ServerEvent::NewRecord(_) => "newRecord",
            ServerEvent::LogsData(_) => "logsData",
        }
    }
}

/// 接続ごとの状態遷移: Connecting -> Active -> Closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    Connecting,
    Active,
    Closed,
}

impl ConnectionPhase {
    /// 登録・履歴送信・入室通知が済んだ
    pub fn activate(self) -> Self {
        match self {
            ConnectionPhase::Connecting => ConnectionPhase::Active,
            other => other,
        }
    }

    /// 切断された（終端状態）
    pub fn close(self) -> Self {
        ConnectionPhase::Closed
    }

    /// クライアントからのイベントを処理できるか
    pub fn accepts_events(self) -> bool {
        self == ConnectionPhase::Active
    }
}

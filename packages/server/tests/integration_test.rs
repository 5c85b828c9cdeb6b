//! Integration tests for the chat relay, driving a real server over WebSocket and HTTP.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    bootstrap::build_server,
    config::ServerConfig,
    infrastructure::dto::websocket::{
        ActivityType, ChatRecordDto, ClientMessage, RecordType, ServerMessage,
    },
};
use hiroba_shared::time::SystemClock;
use tokio::{
    net::{TcpListener, TcpStream},
    sync::oneshot,
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Helper struct to manage server lifecycle
struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Start a test server on an ephemeral port
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();
        let server = build_server(&ServerConfig::default(), Arc::new(SystemClock));
        let (shutdown, rx) = oneshot::channel::<()>();
        tokio::spawn(server.serve(listener, async move {
            let _ = rx.await;
        }));

        TestServer {
            addr,
            shutdown: Some(shutdown),
        }
    }

    fn ws_url(&self, nickname: Option<&str>) -> String {
        match nickname {
            Some(nickname) => format!("ws://{}/ws?nickname={}", self.addr, nickname),
            None => format!("ws://{}/ws", self.addr),
        }
    }

    fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Helper struct wrapping one WebSocket client
struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    async fn connect(server: &TestServer, nickname: Option<&str>) -> Self {
        let (stream, _) = connect_async(server.ws_url(nickname))
            .await
            .expect("Failed to connect");
        TestClient { stream }
    }

    async fn send(&mut self, event: &ClientMessage) {
        let text = serde_json::to_string(event).unwrap();
        self.send_raw(&text).await;
    }

    async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::text(text.to_string()))
            .await
            .expect("Failed to send frame");
    }

    /// Wait for the next server event, skipping control frames
    async fn next_event(&mut self) -> ServerMessage {
        loop {
            let frame = tokio::time::timeout(EVENT_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for event")
                .expect("Stream ended")
                .expect("WebSocket error");
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).expect("Invalid event JSON");
            }
        }
    }

    async fn next_record(&mut self) -> ChatRecordDto {
        match self.next_event().await {
            ServerMessage::NewRecord(record) => record,
            other => panic!("expected newRecord, got {:?}", other),
        }
    }

    /// Connect handshake: history followed by our own join notice
    async fn expect_joined(&mut self, nickname: &str) -> Vec<ChatRecordDto> {
        let history = match self.next_event().await {
            ServerMessage::History(history) => history,
            other => panic!("expected history, got {:?}", other),
        };
        let joined = self.next_record().await;
        assert_eq!(joined.message, format!("{} has joined the chat.", nickname));
        history
    }

    async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}

#[tokio::test]
async fn test_first_client_receives_empty_history_then_join_notice() {
    // テスト項目: 最初のクライアントは空の履歴と自分の入室通知を受け取る
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let mut alice = TestClient::connect(&server, Some("Alice")).await;

    // then (期待する結果):
    assert_eq!(alice.next_event().await, ServerMessage::History(Vec::new()));
    let joined = alice.next_record().await;
    assert_eq!(joined.r#type, RecordType::System);
    assert_eq!(joined.nickname, "System");
    assert_eq!(joined.message, "Alice has joined the chat.");
    assert!(joined.timestamp.ends_with('Z'));
}

#[tokio::test]
async fn test_chat_scenario_join_send_leave_and_logs() {
    // テスト項目: 入室 → 発言 → 退室 の一連の流れと、getLogs の結果
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::connect(&server, Some("Alice")).await;
    alice.expect_joined("Alice").await;
    let mut bob = TestClient::connect(&server, Some("Bob")).await;
    let bob_history = bob.expect_joined("Bob").await;
    assert_eq!(bob_history.len(), 1);
    assert_eq!(alice.next_record().await.message, "Bob has joined the chat.");

    // when (操作): Alice が発言する
    alice
        .send(&ClientMessage::SendMessage("hello".to_string()))
        .await;

    // then (期待する結果): 両方に USER レコードが届く
    for client in [&mut alice, &mut bob] {
        let record = client.next_record().await;
        assert_eq!(record.r#type, RecordType::User);
        assert_eq!(record.nickname, "Alice");
        assert_eq!(record.message, "hello");
    }

    // when (操作): Alice が切断する
    alice.close().await;

    // then (期待する結果): Bob に退室通知が届く
    let left = bob.next_record().await;
    assert_eq!(left.r#type, RecordType::System);
    assert_eq!(left.message, "Alice has left the chat.");

    // when (操作): Bob がログを要求する
    bob.send(&ClientMessage::GetLogs).await;

    // then (期待する結果): Alice の USER_JOIN, MESSAGE_SENT, USER_LEAVE が順に並ぶ
    let entries = match bob.next_event().await {
        ServerMessage::LogsData(entries) => entries,
        other => panic!("expected logsData, got {:?}", other),
    };
    let alice_entries: Vec<_> = entries.iter().filter(|e| e.nickname == "Alice").collect();
    let kinds: Vec<ActivityType> = alice_entries.iter().map(|e| e.r#type).collect();
    assert_eq!(
        kinds,
        vec![
            ActivityType::UserJoin,
            ActivityType::MessageSent,
            ActivityType::UserLeave
        ]
    );
    assert_eq!(alice_entries[1].message.as_deref(), Some("hello"));
    assert!(alice_entries[0].socket_id.is_some());
    assert_eq!(alice_entries[0].socket_id, alice_entries[2].socket_id);
}

#[tokio::test]
async fn test_empty_and_malformed_frames_are_dropped() {
    // テスト項目: 空メッセージや不正なフレームは破棄され、後続のメッセージは届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::connect(&server, Some("Alice")).await;
    alice.expect_joined("Alice").await;

    // when (操作):
    alice
        .send(&ClientMessage::SendMessage("   ".to_string()))
        .await;
    alice.send_raw("this is not json").await;
    alice.send_raw(r#"{"event":"unknown"}"#).await;
    alice
        .send(&ClientMessage::SendMessage("after".to_string()))
        .await;

    // then (期待する結果):
    assert_eq!(alice.next_record().await.message, "after");
    let history: Vec<ChatRecordDto> = reqwest::get(server.http_url("/api/history"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let user_messages: Vec<&str> = history
        .iter()
        .filter(|r| r.r#type == RecordType::User)
        .map(|r| r.message.as_str())
        .collect();
    assert_eq!(user_messages, vec!["after"]);
}

#[tokio::test]
async fn test_missing_nickname_falls_back_to_default() {
    // テスト項目: ニックネーム無しで接続すると Anonymous として扱われる
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let mut client = TestClient::connect(&server, None).await;

    // then (期待する結果):
    client.expect_joined("Anonymous").await;
}

#[tokio::test]
async fn test_repeated_nickname_parameter_uses_first_value() {
    // テスト項目: nickname パラメータが重複していても接続でき、最初の値が使われる
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let mut client = TestClient::connect(&server, Some("Alice&nickname=Bob")).await;

    // then (期待する結果):
    client.expect_joined("Alice").await;
    client.close().await;
}

#[tokio::test]
async fn test_http_endpoints() {
    // テスト項目: health / sessions / logs エンドポイントが現在の状態を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::connect(&server, Some("Alice")).await;
    alice.expect_joined("Alice").await;

    // when (操作):
    let health: serde_json::Value = reqwest::get(server.http_url("/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let sessions: serde_json::Value = reqwest::get(server.http_url("/api/sessions"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let logs: serde_json::Value = reqwest::get(server.http_url("/api/logs"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(health, serde_json::json!({"status": "ok"}));
    assert_eq!(sessions.as_array().map(Vec::len), Some(1));
    assert_eq!(sessions[0]["nickname"], "Alice");
    assert_eq!(logs[0]["type"], "USER_JOIN");
    assert_eq!(logs[0]["nickname"], "Alice");
}

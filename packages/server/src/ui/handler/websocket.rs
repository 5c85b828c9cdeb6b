//! WebSocket connection handlers.
//!
//! Each upgraded connection is driven by one `ConnectionHandler`, which owns the
//! session for its whole lifetime and walks it through
//! `Connecting -> Active -> Closed`.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionPhase, Session},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::SendMessageError,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Default, PartialEq)]
pub struct ConnectQuery {
    pub nickname: Option<String>,
}

impl ConnectQuery {
    /// 同じキーが複数ある場合は最初の値を使う
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let nickname = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "nickname").then_some(value));
        Self { nickname }
    }
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let query = ConnectQuery::from_pairs(pairs);
    ws.on_upgrade(move |socket| handle_socket(socket, state, query.nickname))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: every event pushed to this
/// session's channel is written to its WebSocket connection in order.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, nickname: Option<String>) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    let Some(mut handler) = ConnectionHandler::open(state, nickname, tx).await else {
        return;
    };

    // Spawn a task to write pushed events to this client
    let mut send_task = pusher_loop(rx, sender);

    while handler.phase.accepts_events() {
        tokio::select! {
            frame = receiver.next() => match frame {
                Some(Ok(msg)) => handler.on_message(msg).await,
                Some(Err(e)) => {
                    tracing::warn!("WebSocket error on '{}': {}", handler.session.id, e);
                    handler.mark_closed();
                }
                None => handler.mark_closed(),
            },
            _ = &mut send_task => {
                tracing::debug!("Writer for '{}' stopped", handler.session.id);
                handler.mark_closed();
            }
        }
    }

    send_task.abort();
    handler.close().await;
}

/// Per-connection lifecycle handler
struct ConnectionHandler {
    state: Arc<AppState>,
    session: Session,
    phase: ConnectionPhase,
}

impl ConnectionHandler {
    /// Register the session, replay history and announce the join.
    async fn open(
        state: Arc<AppState>,
        nickname: Option<String>,
        tx: mpsc::UnboundedSender<String>,
    ) -> Option<Self> {
        let phase = ConnectionPhase::Connecting;
        match state.connect_participant_usecase.execute(nickname, tx).await {
            Ok(session) => Some(Self {
                state,
                session,
                phase: phase.activate(),
            }),
            Err(e) => {
                tracing::error!("Rejecting connection: {}", e);
                None
            }
        }
    }

    /// Handle one inbound frame. Frames arriving after close are ignored.
    async fn on_message(&mut self, msg: Message) {
        if !self.phase.accepts_events() {
            tracing::debug!("Ignoring frame on closed session '{}'", self.session.id);
            return;
        }

        match msg {
            Message::Text(text) => {
                match serde_json::from_str::<ClientMessage>(text.as_str()) {
                    Ok(event) => self.dispatch(event).await,
                    Err(e) => {
                        tracing::warn!(
                            "Dropping malformed frame from '{}': {}",
                            self.session.id,
                            e
                        );
                    }
                }
            }
            Message::Binary(_) => {
                tracing::debug!("Ignoring binary frame from '{}'", self.session.id);
            }
            Message::Ping(_) | Message::Pong(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", self.session.id);
                self.mark_closed();
            }
        }
    }

    fn mark_closed(&mut self) {
        self.phase = self.phase.close();
    }

    async fn dispatch(&self, event: ClientMessage) {
        match event {
            ClientMessage::SendMessage(body) => {
                match self
                    .state
                    .send_message_usecase
                    .execute(&self.session, body)
                    .await
                {
                    Ok(_) => {}
                    Err(SendMessageError::EmptyMessage) => {
                        tracing::debug!("Dropped empty message from '{}'", self.session.id);
                    }
                }
            }
            ClientMessage::GetLogs => {
                self.state
                    .get_activity_log_usecase
                    .execute(&self.session)
                    .await;
            }
        }
    }

    /// Deregister the session and announce the leave.
    async fn close(self) {
        self.state
            .disconnect_participant_usecase
            .execute(&self.session.id)
            .await;
    }
}

//! メッセージ送信（通知）の実装
//!
//! - `websocket`: WebSocket writer タスクへのチャンネルを使った実装

pub mod websocket;

pub use websocket::WebSocketMessagePusher;

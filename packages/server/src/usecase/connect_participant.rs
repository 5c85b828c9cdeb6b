//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 登録 → 履歴スナップショット送信 → 入室通知 の一連の処理
//!
//! ### なぜこのテストが必要か
//! - 新しいセッションは、接続時点の履歴を最初に受け取り、その後に追記された
//!   レコードだけを受け取る必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：ニックネーム付きの接続、ニックネーム無しの接続
//! - エッジケース：既存の履歴がある状態での接続

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, PusherChannel, Session};

use super::{broadcast::BroadcastEngine, error::ConnectError};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    engine: Arc<BroadcastEngine>,
    /// ニックネームが指定されなかったときの表示名
    default_display_name: DisplayName,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(engine: Arc<BroadcastEngine>, default_display_name: DisplayName) -> Self {
        Self {
            engine,
            default_display_name,
        }
    }

    /// 参加者接続を実行
    ///
    /// 登録・履歴送信・入室通知を 1 つの公開ターンで行うため、その間に他の接続の
    /// メッセージが割り込むことはありません。
    ///
    /// # Arguments
    ///
    /// * `requested_nickname` - クライアントが指定したニックネーム（無ければ既定値）
    /// * `channel` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - 接続成功（登録されたセッション）
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        requested_nickname: Option<String>,
        channel: PusherChannel,
    ) -> Result<Session, ConnectError> {
        let display_name = DisplayName::or_fallback(requested_nickname, &self.default_display_name);

        let turn = self.engine.begin().await;
        let session = turn
            .register(ConnectionId::generate(), display_name, channel)
            .await?;
        let replayed = turn.deliver_history_snapshot(&session).await;
        turn.announce_join(&session).await;

        tracing::info!(
            "'{}' ({}) joined, replayed {} records",
            session.display_name,
            session.id,
            replayed
        );
        Ok(session)
    }
}

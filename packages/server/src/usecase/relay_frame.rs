//! UseCase: フレーム中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayFrameUseCase::execute() メソッド
//! - 受信フレームが "IP [USER] TEXT" に整形され、送信者を含む全員に配信されること
//!
//! ### なぜこのテストが必要か
//! - 送信者自身も受信者であることで、クライアントは自分のメッセージを判別できる

use std::sync::Arc;

use pipechat_shared::protocol::{BroadcastLine, Frame};

use crate::domain::{BroadcastReport, MessagePusher, SessionId};

/// フレーム中継のユースケース
pub struct RelayFrameUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayFrameUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// Format `frame` for display and fan it out to every session,
    /// including the one it came from.
    pub async fn execute(&self, from: SessionId, frame: &Frame) -> BroadcastReport {
        let line = BroadcastLine::from(frame).to_string();
        let report = self.message_pusher.broadcast(&line, None).await;

        tracing::debug!(
            "Relayed part {} from session {} to {} clients ({} failed): {}",
            frame.part,
            from,
            report.delivered,
            report.failed,
            line
        );
        report
    }
}

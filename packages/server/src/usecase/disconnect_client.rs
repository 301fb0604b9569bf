//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - スロット解放の冪等性（2 回目の呼び出しは何もしない）

use std::sync::Arc;

use crate::domain::{ClientRegistry, SessionId, SlotIndex};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    registry: Arc<dyn ClientRegistry>,
}

impl DisconnectClientUseCase {
    pub fn new(registry: Arc<dyn ClientRegistry>) -> Self {
        Self { registry }
    }

    /// Release the session's slot.
    ///
    /// Returns `true` if this call removed the session, `false` if it had
    /// already been removed.
    pub async fn execute(&self, slot: SlotIndex, session_id: SessionId) -> bool {
        let released = self.registry.release_slot(slot, session_id).await;
        if released {
            tracing::info!(
                "Session {} left slot {} ({} of {} slots in use)",
                session_id,
                slot,
                self.registry.occupied_count().await,
                self.registry.capacity()
            );
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::ClientRegistry, infrastructure::registry::InMemoryClientRegistry};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_disconnect_twice_is_idempotent() {
        // テスト項目: 切断処理を 2 回実行しても 2 回目は何もせず、他のセッションは残る
        // given (前提条件):
        let registry = Arc::new(InMemoryClientRegistry::new(10));
        let (tx1, _rx1) = mpsc::channel(1);
        let (tx2, _rx2) = mpsc::channel(1);
        let leaving = SessionId::generate();
        let staying = SessionId::generate();
        let slot = registry.claim_slot(leaving, tx1).await.unwrap();
        registry.claim_slot(staying, tx2).await.unwrap();
        let usecase = DisconnectClientUseCase::new(registry.clone());

        // when (操作):
        let first = usecase.execute(slot, leaving).await;
        let second = usecase.execute(slot, leaving).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(registry.occupied_count().await, 1);
    }
}

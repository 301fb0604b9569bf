//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 空きスロットの確保と、満杯時の拒否
//!
//! ### どのような状況を想定しているか
//! - 正常系：空きスロットがある場合の登録
//! - 異常系：レジストリが満杯の場合の拒否

use std::sync::Arc;

use crate::domain::{ClientRegistry, OutboundSender, RegistryError, SessionId, SlotIndex};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    registry: Arc<dyn ClientRegistry>,
}

impl ConnectClientUseCase {
    pub fn new(registry: Arc<dyn ClientRegistry>) -> Self {
        Self { registry }
    }

    /// Register a new session and return the slot it occupies.
    ///
    /// # Arguments
    ///
    /// * `session_id` - Identity of the accepted connection
    /// * `outbound` - Queue feeding the session's socket writer
    ///
    /// # Returns
    ///
    /// * `Ok(SlotIndex)` - The session is admitted
    /// * `Err(ConnectError::CapacityExceeded)` - No slot is free
    pub async fn execute(
        &self,
        session_id: SessionId,
        outbound: OutboundSender,
    ) -> Result<SlotIndex, ConnectError> {
        self.registry
            .claim_slot(session_id, outbound)
            .await
            .map_err(|e| match e {
                RegistryError::CapacityExceeded { capacity } => {
                    ConnectError::CapacityExceeded { capacity }
                }
            })
    }
}

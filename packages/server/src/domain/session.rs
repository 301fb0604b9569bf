use std::fmt;

use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique identity of one accepted connection.
///
/// Registry slots are reused; the session id tells a slot's current occupant
/// apart from an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The first block is enough to tell sessions apart in logs.
        let full = self.0.simple().to_string();
        f.write_str(&full[..8])
    }
}

/// Position of a session in the fixed-size registry
pub type SlotIndex = usize;

/// Queue feeding lines to one session's socket writer
pub type OutboundSender = mpsc::Sender<String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_session_ids_are_unique() {
        // テスト項目: 生成されるセッション ID は毎回異なる
        // given (前提条件):
        let first = SessionId::generate();

        // when (操作):
        let second = SessionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(first.to_string().len(), 8);
    }
}

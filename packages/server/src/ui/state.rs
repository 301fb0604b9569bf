//! Server state shared by every session.

use std::sync::Arc;

use crate::usecase::{ConnectClientUseCase, DisconnectClientUseCase, RelayFrameUseCase};

use super::config::ServerConfig;

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// RelayFrameUseCase（フレーム中継のユースケース）
    pub relay_frame_usecase: Arc<RelayFrameUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub config: ServerConfig,
}

//! UseCase layer: the operations a session performs against the domain.

mod connect_client;
mod disconnect_client;
mod error;
mod relay_frame;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::ConnectError;
pub use relay_frame::RelayFrameUseCase;

//! Server execution logic.

use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

use tokio::{
    net::TcpListener,
    sync::watch,
    task::{JoinError, JoinSet},
    time::timeout,
};

use crate::{
    domain::{ClientRegistry, MessagePusher},
    error::ServerError,
    infrastructure::{message_pusher::ChannelMessagePusher, registry::InMemoryClientRegistry},
    usecase::{ConnectClientUseCase, DisconnectClientUseCase, RelayFrameUseCase},
};

use super::{
    acceptor::accept_connection, config::ServerConfig, session::SessionEnd,
    signal::shutdown_signal, state::AppState,
};

/// Pause after a failed `accept` so a persistent error (e.g. out of file
/// descriptors) does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// TCP chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::bind(ServerConfig::default()).await?;
/// server.run_until_ctrl_c().await?;
/// ```
pub struct Server {
    listener: TcpListener,
    registry: Arc<dyn ClientRegistry>,
    state: Arc<AppState>,
}

impl Server {
    /// Bind to `config.host:config.port` and wire up the server's dependencies.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` if the address cannot be bound.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let addr = config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        Ok(Self::from_listener(listener, config))
    }

    /// Build a server around an already bound listener.
    ///
    /// Dependencies are created in order: registry, message pusher, use
    /// cases, shared state.
    pub fn from_listener(listener: TcpListener, config: ServerConfig) -> Self {
        let registry: Arc<dyn ClientRegistry> =
            Arc::new(InMemoryClientRegistry::new(config.max_clients));
        let message_pusher: Arc<dyn MessagePusher> =
            Arc::new(ChannelMessagePusher::new(registry.clone()));

        let state = Arc::new(AppState {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(registry.clone())),
            relay_frame_usecase: Arc::new(RelayFrameUseCase::new(message_pusher)),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(registry.clone())),
            config,
        });

        Self {
            listener,
            registry,
            state,
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle to the client registry, for inspecting occupancy
    pub fn registry(&self) -> Arc<dyn ClientRegistry> {
        self.registry.clone()
    }

    /// Accept connections until `shutdown` resolves, then stop every session.
    ///
    /// Sessions get `shutdown_grace` to finish on their own before they are
    /// aborted.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        tracing::info!(
            "Chat server listening on {} ({} slots)",
            self.listener.local_addr()?,
            self.registry.capacity()
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut sessions: JoinSet<SessionEnd> = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        accept_connection(
                            &self.state,
                            stream,
                            peer,
                            &mut sessions,
                            shutdown_rx.clone(),
                        )
                        .await;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to accept connection: {}", e);
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
                Some(joined) = sessions.join_next(), if !sessions.is_empty() => {
                    log_session_result(joined);
                }
            }
        }

        tracing::info!("Shutting down, closing {} sessions", sessions.len());
        let _ = shutdown_tx.send(true);

        let drained = timeout(self.state.config.shutdown_grace, async {
            while let Some(joined) = sessions.join_next().await {
                log_session_result(joined);
            }
        })
        .await;
        if drained.is_err() {
            tracing::warn!(
                "{} sessions did not finish in time, aborting",
                sessions.len()
            );
            sessions.shutdown().await;
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Run until Ctrl+C or SIGTERM.
    pub async fn run_until_ctrl_c(self) -> Result<(), ServerError> {
        tracing::info!("Press Ctrl+C to shutdown gracefully");
        self.run_until(shutdown_signal()).await
    }
}

fn log_session_result(joined: Result<SessionEnd, JoinError>) {
    match joined {
        Ok(end) => tracing::debug!("Session task finished: {:?}", end),
        Err(e) if e.is_cancelled() => tracing::debug!("Session task aborted"),
        Err(e) => tracing::error!("Session task panicked: {}", e),
    }
}

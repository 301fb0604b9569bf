//! Admission of accepted connections.

use std::{net::SocketAddr, sync::Arc};

use tokio::{
    net::TcpStream,
    sync::{mpsc, watch},
    task::JoinSet,
};

use crate::{domain::SessionId, usecase::ConnectError};

use super::{
    session::{SessionContext, SessionEnd, run_session},
    state::AppState,
};

/// Claim a slot for `stream` and spawn its session into `sessions`.
///
/// A connection that finds the registry full is closed straight away, before
/// anything is read from it.
pub(crate) async fn accept_connection(
    state: &Arc<AppState>,
    stream: TcpStream,
    peer: SocketAddr,
    sessions: &mut JoinSet<SessionEnd>,
    shutdown: watch::Receiver<bool>,
) {
    let session_id = SessionId::generate();
    let (outbound_tx, outbound_rx) = mpsc::channel(state.config.outbound_queue);

    let slot = match state
        .connect_client_usecase
        .execute(session_id, outbound_tx)
        .await
    {
        Ok(slot) => slot,
        Err(ConnectError::CapacityExceeded { capacity }) => {
            tracing::warn!(
                "Rejected connection from {}: all {} slots are in use",
                peer,
                capacity
            );
            drop(stream);
            return;
        }
    };

    if let Err(e) = stream.set_nodelay(true) {
        tracing::warn!("Failed to set up connection from {}: {}", peer, e);
        state
            .disconnect_client_usecase
            .execute(slot, session_id)
            .await;
        return;
    }

    tracing::info!(
        "Client {} connected as session {} in slot {}",
        peer,
        session_id,
        slot
    );

    let ctx = SessionContext {
        session_id,
        slot,
        peer,
    };
    sessions.spawn(run_session(
        state.clone(),
        stream,
        ctx,
        outbound_rx,
        shutdown,
    ));
}

//! Per-connection session: a reader loop that relays frames and a writer
//! task that drains the session's outbound queue onto the socket.

use std::{io, net::SocketAddr, sync::Arc, time::Duration};

use pipechat_shared::protocol::{
    CodecError, Frame, MAX_FRAME_SIZE, read_line_frame, write_line_frame,
};
use tokio::{
    io::{AsyncBufRead, AsyncWrite, AsyncWriteExt, BufReader},
    net::TcpStream,
    sync::{mpsc, watch},
    time::timeout,
};

use crate::domain::{SessionId, SlotIndex};

use super::state::AppState;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The peer closed its side of the connection
    PeerClosed,
    /// The peer sent the disconnect sentinel
    Disconnected,
    /// Nothing was received within the idle timeout
    IdleTimeout,
    /// Reading from or writing to the socket failed
    IoFailure,
    /// The server is shutting down
    Shutdown,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionContext {
    pub session_id: SessionId,
    pub slot: SlotIndex,
    pub peer: SocketAddr,
}

pub(crate) async fn run_session(
    state: Arc<AppState>,
    stream: TcpStream,
    ctx: SessionContext,
    outbound_rx: mpsc::Receiver<String>,
    shutdown: watch::Receiver<bool>,
) -> SessionEnd {
    let (read_half, write_half) = stream.into_split();
    drive_session(
        state,
        BufReader::new(read_half),
        write_half,
        ctx,
        outbound_rx,
        shutdown,
    )
    .await
}

async fn drive_session<R, W>(
    state: Arc<AppState>,
    mut reader: R,
    writer: W,
    ctx: SessionContext,
    outbound_rx: mpsc::Receiver<String>,
    mut shutdown: watch::Receiver<bool>,
) -> SessionEnd
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut writer_task = tokio::spawn(write_loop(writer, outbound_rx, state.config.write_timeout));
    let mut writer_done = false;

    let end = tokio::select! {
        end = read_loop(&state, &mut reader, &ctx) => end,
        _ = wait_for_shutdown(&mut shutdown) => SessionEnd::Shutdown,
        joined = &mut writer_task => {
            writer_done = true;
            match joined {
                Ok(Err(e)) => tracing::warn!("Session {} write failed: {}", ctx.session_id, e),
                Err(e) => tracing::error!("Session {} writer task failed: {}", ctx.session_id, e),
                Ok(Ok(())) => {}
            }
            SessionEnd::IoFailure
        }
    };

    // Releasing the slot drops the registry's sender, which lets the writer
    // flush what is queued and close the socket.
    state
        .disconnect_client_usecase
        .execute(ctx.slot, ctx.session_id)
        .await;

    if !writer_done {
        let drained = timeout(state.config.write_timeout, &mut writer_task).await;
        if drained.is_err() {
            tracing::warn!("Session {} writer did not finish, aborting", ctx.session_id);
            writer_task.abort();
        }
    }

    tracing::info!(
        "Client {} (session {}) disconnected: {:?}",
        ctx.peer,
        ctx.session_id,
        end
    );
    end
}

async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    // A dropped sender also means the server is going away.
    let _ = shutdown.wait_for(|stopping| *stopping).await;
}

/// Read frames until the peer leaves, goes quiet, or the socket fails.
///
/// Frames that cannot be decoded are logged and skipped; the session stays
/// open.
async fn read_loop<R>(state: &AppState, reader: &mut R, ctx: &SessionContext) -> SessionEnd
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let line = match timeout(
            state.config.idle_timeout,
            read_line_frame(reader, MAX_FRAME_SIZE),
        )
        .await
        {
            Err(_) => return SessionEnd::IdleTimeout,
            Ok(Ok(Some(line))) => line,
            Ok(Ok(None)) => return SessionEnd::PeerClosed,
            Ok(Err(CodecError::Io(e))) => {
                tracing::warn!("Session {} read failed: {}", ctx.session_id, e);
                return SessionEnd::IoFailure;
            }
            Ok(Err(e)) => {
                tracing::warn!("Session {} sent an unreadable line: {}", ctx.session_id, e);
                continue;
            }
        };

        let frame = match Frame::decode(&line) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("Session {} sent a bad frame: {}", ctx.session_id, e);
                continue;
            }
        };

        if frame.is_disconnect() {
            tracing::debug!(
                "Session {} ({}) said goodbye",
                ctx.session_id,
                frame.username
            );
            return SessionEnd::Disconnected;
        }

        state
            .relay_frame_usecase
            .execute(ctx.session_id, &frame)
            .await;
    }
}

/// Write queued lines until every sender is gone, then close the socket.
async fn write_loop<W>(
    mut writer: W,
    mut outbound_rx: mpsc::Receiver<String>,
    write_timeout: Duration,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = outbound_rx.recv().await {
        match timeout(write_timeout, write_line_frame(&mut writer, &line)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "timed out writing to client",
                ));
            }
        }
    }
    writer.shutdown().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{BroadcastReport, ClientRegistry, MessagePusher, MockMessagePusher},
        infrastructure::registry::InMemoryClientRegistry,
        ui::config::ServerConfig,
        usecase::{ConnectClientUseCase, DisconnectClientUseCase, RelayFrameUseCase},
    };
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, duplex};

    fn create_state_with_config(
        pusher: MockMessagePusher,
        config: ServerConfig,
    ) -> (AppState, Arc<InMemoryClientRegistry>) {
        let registry = Arc::new(InMemoryClientRegistry::new(10));
        let shared: Arc<dyn ClientRegistry> = registry.clone();
        let pusher: Arc<dyn MessagePusher> = Arc::new(pusher);
        let state = AppState {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(shared.clone())),
            relay_frame_usecase: Arc::new(RelayFrameUseCase::new(pusher)),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(shared)),
            config,
        };
        (state, registry)
    }

    fn create_state(pusher: MockMessagePusher, idle_timeout: Duration) -> AppState {
        let config = ServerConfig {
            idle_timeout,
            ..ServerConfig::default()
        };
        create_state_with_config(pusher, config).0
    }

    fn create_context() -> SessionContext {
        SessionContext {
            session_id: SessionId::generate(),
            slot: 0,
            peer: "127.0.0.1:40000".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_read_loop_skips_bad_frames_and_stops_at_sentinel() {
        // テスト項目: 不正なフレームは無視され、正しいフレームだけが中継され、切断センチネルで終了する
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(|line, _| line == "10.0.0.1 [alice] hi")
            .times(1)
            .returning(|_, _| BroadcastReport::default());
        let state = create_state(pusher, Duration::from_secs(5));
        let (mut client, server) = duplex(1024);
        client
            .write_all(b"garbage without delimiters\n10.0.0.1|alice|0|hi\n10.0.0.1|alice|0|>>bye<<\n")
            .await
            .unwrap();
        let mut reader = tokio::io::BufReader::new(server);

        // when (操作):
        let end = read_loop(&state, &mut reader, &create_context()).await;

        // then (期待する結果):
        assert_eq!(end, SessionEnd::Disconnected);
    }

    #[tokio::test]
    async fn test_read_loop_reports_peer_close() {
        // テスト項目: 相手がソケットを閉じると PeerClosed で終了する
        // given (前提条件):
        let state = create_state(MockMessagePusher::new(), Duration::from_secs(5));
        let (client, server) = duplex(64);
        drop(client);
        let mut reader = tokio::io::BufReader::new(server);

        // when (操作):
        let end = read_loop(&state, &mut reader, &create_context()).await;

        // then (期待する結果):
        assert_eq!(end, SessionEnd::PeerClosed);
    }

    #[tokio::test]
    async fn test_read_loop_times_out_when_idle() {
        // テスト項目: アイドルタイムアウト内に何も受信しないと IdleTimeout で終了する
        // given (前提条件):
        let state = create_state(MockMessagePusher::new(), Duration::from_millis(50));
        let (_client, server) = duplex(64);
        let mut reader = tokio::io::BufReader::new(server);

        // when (操作):
        let end = read_loop(&state, &mut reader, &create_context()).await;

        // then (期待する結果):
        assert_eq!(end, SessionEnd::IdleTimeout);
    }

    #[tokio::test]
    async fn test_write_loop_drains_queue_then_closes() {
        // テスト項目: 送信キューの内容を順に書き出し、送信側がすべて破棄されるとソケットを閉じる
        // given (前提条件):
        let (client, server) = duplex(1024);
        let (tx, rx) = mpsc::channel(4);
        tx.send("first".to_string()).await.unwrap();
        tx.send("second".to_string()).await.unwrap();
        drop(tx);

        // when (操作):
        let result = write_loop(server, rx, Duration::from_secs(1)).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let mut lines = tokio::io::BufReader::new(client).lines();
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("first"));
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("second"));
        assert_eq!(lines.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_loop_times_out_on_stalled_peer() {
        // テスト項目: 相手が読み取らず書き込みがタイムアウトすると、書き込みタスクは TimedOut で終了する
        // given (前提条件):
        let (_client, server) = duplex(8);
        let (tx, rx) = mpsc::channel(4);
        tx.send("y".repeat(64)).await.unwrap();

        // when (操作):
        let result = write_loop(server, rx, Duration::from_millis(50)).await;

        // then (期待する結果):
        let error = result.expect_err("write to a stalled peer should fail");
        assert_eq!(error.kind(), io::ErrorKind::TimedOut);
    }

    #[tokio::test]
    async fn test_stalled_writer_ends_session_and_releases_slot() {
        // テスト項目: 書き込みタイムアウトでセッションが IoFailure で終了し、スロットが解放される
        // given (前提条件):
        let config = ServerConfig {
            write_timeout: Duration::from_millis(50),
            ..ServerConfig::default()
        };
        let (state, registry) = create_state_with_config(MockMessagePusher::new(), config);
        let session_id = SessionId::generate();
        let (tx, rx) = mpsc::channel(4);
        let slot = registry.claim_slot(session_id, tx.clone()).await.unwrap();
        tx.send("y".repeat(64)).await.unwrap();
        drop(tx);

        let (_client, server) = duplex(8);
        let (server_read, server_write) = tokio::io::split(server);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let ctx = SessionContext {
            session_id,
            slot,
            peer: "127.0.0.1:40001".parse().unwrap(),
        };

        // when (操作):
        let end = timeout(
            Duration::from_secs(2),
            drive_session(
                Arc::new(state),
                tokio::io::BufReader::new(server_read),
                server_write,
                ctx,
                rx,
                shutdown_rx,
            ),
        )
        .await
        .expect("session should end after the write timeout");

        // then (期待する結果):
        assert_eq!(end, SessionEnd::IoFailure);
        assert_eq!(registry.occupied_count().await, 0);
    }
}

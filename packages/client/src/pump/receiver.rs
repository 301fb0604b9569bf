//! Receive pump: broadcast lines from the server to the renderer.

use std::sync::Arc;

use pipechat_shared::protocol::{
    BroadcastLine, CodecError, MAX_BROADCAST_LINE_SIZE, read_line_frame,
};
use tokio::io::AsyncBufRead;

use crate::renderer::Renderer;

/// Shown when the server closes the connection
pub const SERVER_DISCONNECTED: &str = "Server disconnected.";

/// How the receive loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveEnd {
    /// The server closed the connection
    ServerClosed,
    /// Reading from the connection failed
    ReadFailed,
}

/// Reads broadcast lines and hands them to a [`Renderer`]
pub struct ReceivePump {
    own_ip: String,
    renderer: Arc<dyn Renderer>,
}

impl ReceivePump {
    pub fn new(own_ip: impl Into<String>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            own_ip: own_ip.into(),
            renderer,
        }
    }

    /// Render every received line until the connection ends.
    ///
    /// A line counts as this client's own when its sender IP equals
    /// `own_ip`. Lines that do not parse are still shown, unmarked.
    pub async fn run<R>(&self, reader: &mut R) -> ReceiveEnd
    where
        R: AsyncBufRead + Unpin,
    {
        loop {
            match read_line_frame(reader, MAX_BROADCAST_LINE_SIZE).await {
                Ok(Some(line)) => self.render_line(&line),
                Ok(None) => {
                    self.renderer.render(SERVER_DISCONNECTED, false);
                    return ReceiveEnd::ServerClosed;
                }
                Err(CodecError::Io(e)) => {
                    self.renderer.render(&format!("Read error: {e}"), false);
                    return ReceiveEnd::ReadFailed;
                }
                Err(e) => {
                    tracing::debug!("Skipping unreadable line from server: {}", e);
                }
            }
        }
    }

    fn render_line(&self, line: &str) {
        match BroadcastLine::parse(line) {
            Ok(parsed) => self.renderer.render(line, parsed.sender_ip == self.own_ip),
            Err(e) => {
                tracing::debug!("Rendering unparsed line: {}", e);
                self.renderer.render(line, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MockRenderer;
    use mockall::{Sequence, predicate::eq};
    use tokio::io::{AsyncWriteExt, BufReader, duplex};

    #[tokio::test]
    async fn test_receive_marks_own_messages() {
        // テスト項目: 送信者 IP が自分の IP と一致する行だけが自分のメッセージとして表示される
        // given (前提条件):
        let mut renderer = MockRenderer::new();
        let mut sequence = Sequence::new();
        renderer
            .expect_render()
            .with(eq("10.0.0.1 [alice] mine"), eq(true))
            .times(1)
            .in_sequence(&mut sequence)
            .return_const(());
        renderer
            .expect_render()
            .with(eq("10.0.0.2 [bob] yours"), eq(false))
            .times(1)
            .in_sequence(&mut sequence)
            .return_const(());
        renderer
            .expect_render()
            .with(eq(SERVER_DISCONNECTED), eq(false))
            .times(1)
            .in_sequence(&mut sequence)
            .return_const(());
        let pump = ReceivePump::new("10.0.0.1", Arc::new(renderer));
        let (mut server, client) = duplex(1024);
        server
            .write_all(b"10.0.0.1 [alice] mine\n10.0.0.2 [bob] yours\n")
            .await
            .unwrap();
        drop(server);

        // when (操作):
        let end = pump.run(&mut BufReader::new(client)).await;

        // then (期待する結果):
        assert_eq!(end, ReceiveEnd::ServerClosed);
    }

    #[tokio::test]
    async fn test_receive_renders_unparsable_line_raw() {
        // テスト項目: 解析できない行はそのまま、自分のメッセージではないものとして表示される
        // given (前提条件):
        let mut renderer = MockRenderer::new();
        renderer
            .expect_render()
            .with(eq("welcome!"), eq(false))
            .times(1)
            .return_const(());
        renderer
            .expect_render()
            .with(eq(SERVER_DISCONNECTED), eq(false))
            .times(1)
            .return_const(());
        let pump = ReceivePump::new("10.0.0.1", Arc::new(renderer));
        let (mut server, client) = duplex(1024);
        server.write_all(b"welcome!\n").await.unwrap();
        drop(server);

        // when (操作):
        let end = pump.run(&mut BufReader::new(client)).await;

        // then (期待する結果):
        assert_eq!(end, ReceiveEnd::ServerClosed);
    }
}

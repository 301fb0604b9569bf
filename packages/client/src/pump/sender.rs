//! Send pump: user text to protocol frames.

use std::time::Duration;

use pipechat_shared::protocol::{
    Frame, MAX_MESSAGE_LEN, MAX_PART_LEN, Username, split_message, truncate_chars, write_line_frame,
};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::ClientError;

/// Writes this client's frames to the server connection
pub struct FrameSender<W> {
    writer: W,
    sender_ip: String,
    username: Username,
    split_delay: Duration,
}

impl<W> FrameSender<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(
        writer: W,
        sender_ip: impl Into<String>,
        username: Username,
        split_delay: Duration,
    ) -> Self {
        Self {
            writer,
            sender_ip: sender_ip.into(),
            username,
            split_delay,
        }
    }

    /// Send one user message and return the number of frames written.
    ///
    /// Trailing whitespace is trimmed and text past `MAX_MESSAGE_LEN`
    /// characters is dropped. Messages longer than one part go out as a
    /// `First` frame and, after `split_delay`, a `Second` frame.
    ///
    /// # Errors
    ///
    /// * `ClientError::Protocol` - the text contains `|`; nothing is sent
    /// * `ClientError::Io` - writing to the connection failed
    pub async fn send_text(&mut self, text: &str) -> Result<usize, ClientError> {
        let text = truncate_chars(text.trim_end(), MAX_MESSAGE_LEN);
        if text.is_empty() {
            return Ok(0);
        }

        let split = split_message(text, MAX_PART_LEN);
        // Encode every part first so a rejected message sends nothing.
        let encoded = split
            .parts()
            .into_iter()
            .map(|(part, part_text)| {
                Frame::new(&self.sender_ip, self.username.as_str(), part, part_text).encode()
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (i, line) in encoded.iter().enumerate() {
            if i > 0 && !self.split_delay.is_zero() {
                tokio::time::sleep(self.split_delay).await;
            }
            write_line_frame(&mut self.writer, line).await?;
        }

        tracing::debug!("Sent {} frame(s): {:?}", encoded.len(), encoded);
        Ok(encoded.len())
    }

    /// Send the disconnect sentinel and close the write side.
    pub async fn send_disconnect(&mut self) -> Result<(), ClientError> {
        let line = Frame::disconnect(&self.sender_ip, self.username.as_str()).encode()?;
        write_line_frame(&mut self.writer, &line).await?;
        self.writer.shutdown().await?;
        Ok(())
    }
}

//! Newline framing over byte streams.
//!
//! One frame per line replaces the one-`read()`-per-frame assumption, so a
//! frame split across TCP segments (or two frames in one segment) is still
//! read correctly.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::{constants::FRAME_TERMINATOR, error::CodecError};

/// Read one line of at most `max_len` bytes, without its terminator.
///
/// Both `\n` and `\r\n` terminate a line; neither counts towards
/// `max_len`. Returns `Ok(None)` on a clean end of stream. A final line
/// without a terminator is still returned. When a line exceeds `max_len` the
/// rest of it is discarded and `LineTooLong` is returned, so the next call
/// starts at the following line.
pub async fn read_line_frame<R>(
    reader: &mut R,
    max_len: usize,
) -> Result<Option<String>, CodecError>
where
    R: AsyncBufRead + Unpin,
{
    // Room for the content plus a `\r\n` terminator.
    let limit = max_len as u64 + 2;
    let mut buf = Vec::with_capacity(max_len + 2);
    let read = (&mut *reader)
        .take(limit)
        .read_until(FRAME_TERMINATOR, &mut buf)
        .await?;
    if read == 0 {
        return Ok(None);
    }

    let terminated = buf.last() == Some(&FRAME_TERMINATOR);
    if terminated {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    if buf.len() > max_len {
        if !terminated {
            discard_rest_of_line(reader).await?;
        }
        return Err(CodecError::LineTooLong { limit: max_len });
    }

    String::from_utf8(buf)
        .map(Some)
        .map_err(|_| CodecError::InvalidUtf8)
}

/// Write `line` followed by the terminator and flush
pub async fn write_line_frame<W>(writer: &mut W, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut encoded = Vec::with_capacity(line.len() + 1);
    encoded.extend_from_slice(line.as_bytes());
    encoded.push(FRAME_TERMINATOR);
    writer.write_all(&encoded).await?;
    writer.flush().await
}

async fn discard_rest_of_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let (consumed, found_terminator) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == FRAME_TERMINATOR) {
                Some(pos) => (pos + 1, true),
                None => (available.len(), false),
            }
        };
        reader.consume(consumed);
        if found_terminator {
            return Ok(());
        }
    }
}

//! The client → server protocol frame.

use std::{fmt, str::FromStr};

use super::{
    constants::{DISCONNECT_SENTINEL, FIELD_DELIMITER, MAX_FRAME_SIZE},
    error::ProtocolError,
};

/// Position of a frame's text within the user's message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartIndex {
    /// The whole message fits in one frame
    Single = 0,
    /// First half of a split message
    First = 1,
    /// Second half of a split message
    Second = 2,
}

impl PartIndex {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PartIndex {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Single),
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(ProtocolError::MalformedFrame(format!(
                "part index {other} is not 0, 1 or 2"
            ))),
        }
    }
}

impl FromStr for PartIndex {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s.trim().parse().map_err(|_| {
            ProtocolError::MalformedFrame(format!("part index '{s}' is not a number"))
        })?;
        Self::try_from(value)
    }
}

impl fmt::Display for PartIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// One `IP|USERNAME|PART|TEXT` protocol frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub sender_ip: String,
    pub username: String,
    pub part: PartIndex,
    pub text: String,
}

impl Frame {
    pub fn new(
        sender_ip: impl Into<String>,
        username: impl Into<String>,
        part: PartIndex,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender_ip: sender_ip.into(),
            username: username.into(),
            part,
            text: text.into(),
        }
    }

    /// Frame asking the server to end this client's session
    pub fn disconnect(sender_ip: impl Into<String>, username: impl Into<String>) -> Self {
        Self::new(sender_ip, username, PartIndex::Single, DISCONNECT_SENTINEL)
    }

    pub fn is_disconnect(&self) -> bool {
        self.text == DISCONNECT_SENTINEL
    }

    /// Encode to `IP|USERNAME|PART|TEXT` without the line terminator.
    ///
    /// # Errors
    ///
    /// * `UnsupportedInput` - a field contains `|` or a line break
    /// * `FrameTooLarge` - the result exceeds [`MAX_FRAME_SIZE`] bytes
    pub fn encode(&self) -> Result<String, ProtocolError> {
        check_field("sender_ip", &self.sender_ip)?;
        check_field("username", &self.username)?;
        check_field("text", &self.text)?;

        let encoded = format!(
            "{}{d}{}{d}{}{d}{}",
            self.sender_ip,
            self.username,
            self.part,
            self.text,
            d = FIELD_DELIMITER
        );
        if encoded.len() > MAX_FRAME_SIZE {
            return Err(ProtocolError::FrameTooLarge {
                size: encoded.len(),
                max: MAX_FRAME_SIZE,
            });
        }
        Ok(encoded)
    }

    /// Decode one received line.
    ///
    /// The line is split into at most four tokens, so everything after the
    /// third delimiter belongs to the text.
    pub fn decode(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let tokens: Vec<&str> = line.splitn(4, FIELD_DELIMITER).collect();
        let [sender_ip, username, part, text] = tokens.as_slice() else {
            return Err(ProtocolError::MalformedFrame(format!(
                "expected 4 fields, found {}",
                tokens.len()
            )));
        };

        Ok(Self {
            sender_ip: (*sender_ip).to_string(),
            username: (*username).to_string(),
            part: part.parse()?,
            text: (*text).to_string(),
        })
    }
}

fn check_field(field: &'static str, value: &str) -> Result<(), ProtocolError> {
    if value.contains(FIELD_DELIMITER) {
        return Err(ProtocolError::UnsupportedInput {
            field,
            reason: format!("'{FIELD_DELIMITER}' is the field delimiter"),
        });
    }
    if value.contains(['\n', '\r']) {
        return Err(ProtocolError::UnsupportedInput {
            field,
            reason: "line breaks terminate frames".to_string(),
        });
    }
    Ok(())
}

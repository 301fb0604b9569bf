//! Validated identity values carried in frames.

use std::fmt;

use super::{constants::MAX_USERNAME_LEN, error::ProtocolError};

/// Validated chat username (1-5 characters, no reserved characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> Result<Self, ProtocolError> {
        let value = value.into();
        let length = value.chars().count();
        let has_reserved = value
            .chars()
            .any(|c| matches!(c, '|' | '[' | ']') || c.is_whitespace() || c.is_control());

        if length == 0 || length > MAX_USERNAME_LEN || has_reserved {
            return Err(ProtocolError::InvalidUsername(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// TCP port the server listens on by convention
pub const SERVER_PORT: u16 = 8888;

/// Maximum encoded size of one frame in bytes, excluding the terminator
pub const MAX_FRAME_SIZE: usize = 128;

/// Maximum size of one server → client line in bytes, excluding the terminator
pub const MAX_BROADCAST_LINE_SIZE: usize = 256;

/// Maximum number of characters carried by one frame
pub const MAX_PART_LEN: usize = 40;

/// Maximum number of characters a user can submit at once
pub const MAX_MESSAGE_LEN: usize = 80;

/// Maximum number of characters in a username
pub const MAX_USERNAME_LEN: usize = 5;

/// Frame text that asks the server to end the session
pub const DISCONNECT_SENTINEL: &str = ">>bye<<";

pub const FIELD_DELIMITER: char = '|';

pub const FRAME_TERMINATOR: u8 = b'\n';

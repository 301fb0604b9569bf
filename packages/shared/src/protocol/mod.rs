//! Wire protocol shared by the server and the client.
//!
//! Client → server: one [`Frame`] per line, `IP|USERNAME|PART|TEXT`.
//! Server → client: one [`BroadcastLine`] per line, `IP [USERNAME] TEXT`.
//!
//! Messages longer than [`MAX_PART_LEN`] characters are cut into two frames
//! by [`split_message`].

mod broadcast;
mod codec;
mod constants;
mod error;
mod frame;
mod identity;
mod split;

pub use broadcast::BroadcastLine;
pub use codec::{read_line_frame, write_line_frame};
pub use constants::*;
pub use error::{CodecError, ProtocolError};
pub use frame::{Frame, PartIndex};
pub use identity::Username;
pub use split::{SplitMessage, split_message, truncate_chars};

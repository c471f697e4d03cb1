use crate::MessageKind;

/// errno values reported by [`Error::code`].
mod errno {
    pub const ENOMEM: i32 = 12;
    pub const EBUSY: i32 = 16;
    pub const EEXIST: i32 = 17;
    pub const EINVAL: i32 = 22;
    pub const ENOMSG: i32 = 42;
    pub const EALREADY: i32 = 114;
}

/// The single error type for all busprobe operations.
///
/// Every fallible API returns `busprobe::Result<T>` (alias for
/// `Result<T, busprobe::Error>`). Every variant maps to an errno-style
/// code through [`Error::code`], so a shell command can hand a bus failure
/// back to its caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Channel '{0}' is busy")]
    Busy(String),

    #[error("Channel '{channel}' carries {expected} messages, got {found}")]
    InvalidMessage {
        channel: String,
        expected: MessageKind,
        found: MessageKind,
    },

    #[error("Channel '{0}' has no listener capacity left")]
    ListenerCapacity(String),

    #[error("Listener already registered on channel '{0}'")]
    DuplicateListener(String),

    #[error("Channel '{0}' registered twice with the trace dispatcher")]
    DuplicateChannel(String),

    #[error("Channel '{channel}' carries {carries} messages, decoder reads {decodes}")]
    DecoderMismatch {
        channel: String,
        carries: MessageKind,
        decodes: MessageKind,
    },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl Error {
    /// Negative errno code for this error, as a bus would return it.
    pub fn code(&self) -> i32 {
        use errno::*;
        let errno = match self {
            Error::Busy(_) => EBUSY,
            Error::InvalidMessage { .. } => ENOMSG,
            Error::ListenerCapacity(_) => ENOMEM,
            Error::DuplicateListener(_) => EALREADY,
            Error::DuplicateChannel(_) => EEXIST,
            Error::DecoderMismatch { .. } | Error::InvalidCommand(_) => EINVAL,
        };
        -errno
    }
}

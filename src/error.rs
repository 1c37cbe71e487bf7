use std::io;
use thiserror::Error;

/// A specialized [`Result`][std::result::Result] type for encode and decode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while concealing or revealing a message.
///
/// Every error is terminal for the call that produced it.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing or unusable, such as a zero output limit.
    #[error("invalid argument: {0}")]
    NullArgument(&'static str),

    /// The pixel stream could not be opened or read.
    #[error("source unreadable")]
    SourceUnreadable(#[source] io::Error),

    /// The output could not be created or written to.
    #[error("destination unwritable")]
    DestinationUnwritable(#[source] io::Error),

    /// The message does not fit into the pixel stream.
    #[error("message of {len} bytes exceeds capacity of {capacity} bytes")]
    MessageTooLong { len: usize, capacity: usize },

    /// A token is not an integer in the range `0..=255`.
    #[error("malformed sample {token:?} at position {position}")]
    MalformedSample { position: usize, token: String },

    /// A revealed character failed the printable check.
    #[error("corrupt payload: byte {byte:#04x} at offset {offset} is not printable")]
    CorruptPayload { offset: usize, byte: u8 },
}

impl Error {
    /// Collapses the error into the numeric result code of the command-line tool.
    ///
    /// Several kinds share code `3`, so the mapping is lossy.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::NullArgument(_) => 1,
            Self::SourceUnreadable(_) => 2,
            Self::MessageTooLong { .. }
            | Self::MalformedSample { .. }
            | Self::CorruptPayload { .. } => 3,
            Self::DestinationUnwritable(_) => 4,
        }
    }
}

use std::time::Duration;

use bytes::Bytes;
use uartprims_frame::{Command, DecodeError, DeviceStatus, EncodeError, ReplyError};
use uartprims_transport::ChannelError;

/// Errors from a single exchange.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The request could not be framed.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// Stale input could not be cleared before sending.
    #[error("failed to discard stale input: {0}")]
    Discard(#[source] ChannelError),

    /// The channel rejected the request bytes.
    #[error("write failed: {0}")]
    Write(#[source] ChannelError),

    /// The channel failed while waiting for the reply.
    #[error("read failed: {0}")]
    Read(#[source] ChannelError),

    /// Fewer than a minimal frame's worth of bytes arrived in time.
    #[error(
        "no response ({received} bytes received in {waited:?}{})",
        closed_suffix(.channel_closed)
    )]
    NoResponse {
        received: usize,
        waited: Duration,
        channel_closed: bool,
    },

    /// Bytes arrived but do not form a valid frame.
    #[error("invalid response: {0}")]
    Decode(#[from] DecodeError),
}

fn closed_suffix(closed: &bool) -> &'static str {
    if *closed {
        ", channel closed"
    } else {
        ""
    }
}

/// Errors from a typed command helper on [`Session`](crate::Session).
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The exchange itself failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The device answered with a nonzero status.
    #[error("{command} rejected by device: {status}")]
    Device {
        command: Command,
        status: DeviceStatus,
        /// Opaque diagnostic bytes sent with the failure status.
        data: Bytes,
    },

    /// The device answered success but the data does not fit the reply layout.
    #[error("malformed {command} reply: {source}")]
    MalformedReply {
        command: Command,
        source: ReplyError,
    },
}

pub type Result<T> = std::result::Result<T, SessionError>;

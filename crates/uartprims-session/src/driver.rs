use std::time::{Duration, Instant};

use bytes::BytesMut;
use tracing::{debug, trace};
use uartprims_frame::{
    build_frame, command_name, frame_len_hint, parse_response, Response, MAX_FRAME_SIZE,
    MIN_FRAME_SIZE, SOF,
};
use uartprims_transport::{Channel, ChannelError};

use crate::error::{Result, SessionError};

/// Upper bound on a single channel read: one maximal frame.
pub const READ_CHUNK_SIZE: usize = MAX_FRAME_SIZE;

/// Run one request/response exchange.
///
/// Writes the frame for `cmd`/`payload`, then reads until the reply frame
/// its header announces is complete or `timeout` has elapsed in total.
/// Nothing is retried.
pub fn execute<C: Channel + ?Sized>(
    channel: &mut C,
    cmd: u8,
    payload: &[u8],
    timeout: Duration,
) -> Result<Response> {
    let frame = build_frame(cmd, payload)?;
    debug!(
        command = command_name(cmd),
        cmd,
        frame = %hex::encode(frame.as_bytes()),
        "sending frame"
    );
    channel.write(frame.as_bytes()).map_err(SessionError::Write)?;

    let started = Instant::now();
    let deadline = started + timeout;
    let mut buf = BytesMut::with_capacity(MAX_FRAME_SIZE);
    let mut closed = false;

    while !response_complete(&buf) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        match channel.read(bytes_wanted(&buf), remaining) {
            Ok(chunk) => {
                trace!(len = chunk.len(), "response chunk");
                buf.extend_from_slice(&chunk);
            }
            Err(ChannelError::Closed) => {
                closed = true;
                break;
            }
            Err(err) => return Err(SessionError::Read(err)),
        }
    }

    finish(&buf, started.elapsed(), closed)
}

/// Whether enough bytes are buffered to stop reading.
///
/// A buffer not starting with SOF is complete once it reaches the minimal
/// frame size; decode then reports the bad marker.
pub(crate) fn response_complete(buf: &[u8]) -> bool {
    buf.len() >= target_len(buf)
}

/// How many more bytes the current buffer needs.
pub(crate) fn bytes_wanted(buf: &[u8]) -> usize {
    target_len(buf).saturating_sub(buf.len()).clamp(1, READ_CHUNK_SIZE)
}

fn target_len(buf: &[u8]) -> usize {
    match buf.first() {
        Some(&SOF) => frame_len_hint(buf).map_or(MIN_FRAME_SIZE, |n| n.max(MIN_FRAME_SIZE)),
        _ => MIN_FRAME_SIZE,
    }
}

/// Turn the bytes collected for one exchange into its outcome.
pub(crate) fn finish(buf: &[u8], waited: Duration, channel_closed: bool) -> Result<Response> {
    if buf.len() < MIN_FRAME_SIZE {
        debug!(
            received = buf.len(),
            ?waited,
            channel_closed,
            "no response"
        );
        return Err(SessionError::NoResponse {
            received: buf.len(),
            waited,
            channel_closed,
        });
    }

    debug!(frame = %hex::encode(buf), ?waited, "received bytes");
    let response = parse_response(buf)?;
    Ok(response)
}

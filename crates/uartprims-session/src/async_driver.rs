//! Async exchange over any tokio byte stream.
//!
//! Same state machine as [`execute`](crate::execute): one frame out, one
//! deadline for the reply, no retry.

use std::io::ErrorKind;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, trace};
use uartprims_frame::{build_frame, command_name, Response, MAX_FRAME_SIZE};
use uartprims_transport::ChannelError;

use crate::driver::{bytes_wanted, finish, response_complete};
use crate::error::{Result, SessionError};

/// Run one request/response exchange on an async stream.
pub async fn execute_async<S>(
    stream: &mut S,
    cmd: u8,
    payload: &[u8],
    timeout: Duration,
) -> Result<Response>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let frame = build_frame(cmd, payload)?;
    debug!(
        command = command_name(cmd),
        cmd,
        frame = %hex::encode(frame.as_bytes()),
        "sending frame"
    );
    stream
        .write_all(frame.as_bytes())
        .await
        .map_err(|err| SessionError::Write(ChannelError::Io(err)))?;
    stream
        .flush()
        .await
        .map_err(|err| SessionError::Write(ChannelError::Io(err)))?;

    let started = Instant::now();
    let deadline = started + timeout;
    let mut buf = BytesMut::with_capacity(MAX_FRAME_SIZE);
    let mut chunk = [0u8; MAX_FRAME_SIZE];
    let mut closed = false;

    while !response_complete(&buf) {
        let want = bytes_wanted(&buf);
        match timeout_at(deadline, stream.read(&mut chunk[..want])).await {
            Err(_elapsed) => break,
            Ok(Ok(0)) => {
                closed = true;
                break;
            }
            Ok(Ok(n)) => {
                trace!(len = n, "response chunk");
                buf.extend_from_slice(&chunk[..n]);
            }
            Ok(Err(err)) if err.kind() == ErrorKind::Interrupted => continue,
            Ok(Err(err)) => return Err(SessionError::Read(ChannelError::Io(err))),
        }
    }

    finish(&buf, started.elapsed(), closed)
}

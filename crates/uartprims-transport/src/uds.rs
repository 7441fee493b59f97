use std::io::{ErrorKind, Read};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::error::{ChannelError, Result};
use crate::io::{read_available, write_fully};
use crate::traits::Channel;

const DRAIN_CHUNK_SIZE: usize = 512;

/// A channel over a Unix domain socket.
///
/// Firmware emulators (QEMU `-serial unix:<path>,server`, Renode, custom
/// simulators) expose the device UART this way.
pub struct UnixChannel {
    stream: UnixStream,
    path: PathBuf,
}

impl UnixChannel {
    /// Connect to a listening emulator socket (blocking).
    pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let stream = UnixStream::connect(path).map_err(|source| ChannelError::Open {
            port: format!("{}{}", crate::config::UNIX_PREFIX, path.display()),
            source,
        })?;
        debug!(?path, "connected to unix socket channel");
        Ok(Self {
            stream,
            path: path.to_path_buf(),
        })
    }

    /// Wrap an already-connected stream (e.g. one half of `UnixStream::pair`).
    pub fn from_stream(stream: UnixStream) -> Self {
        Self {
            stream,
            path: PathBuf::from("<pair>"),
        }
    }

    /// The socket path this channel is connected to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Channel for UnixChannel {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        write_fully(&mut self.stream, bytes)
    }

    fn read(&mut self, max_bytes: usize, timeout: Duration) -> Result<Bytes> {
        // A zero timeout is rejected by `set_read_timeout`.
        if timeout.is_zero() {
            return Ok(Bytes::new());
        }
        self.stream.set_read_timeout(Some(timeout))?;
        let chunk = read_available(&mut self.stream, max_bytes)?;
        trace!(path = ?self.path, len = chunk.len(), "unix socket read");
        Ok(chunk)
    }

    fn discard_input(&mut self) -> Result<()> {
        self.stream.set_nonblocking(true)?;
        let mut scratch = [0u8; DRAIN_CHUNK_SIZE];
        let mut discarded = 0usize;
        let outcome = loop {
            match self.stream.read(&mut scratch) {
                Ok(0) => break Err(ChannelError::Closed),
                Ok(n) => discarded += n,
                Err(err) if err.kind() == ErrorKind::WouldBlock => break Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => break Err(ChannelError::Io(err)),
            }
        };
        self.stream.set_nonblocking(false)?;
        if discarded > 0 {
            warn!(path = ?self.path, discarded, "discarded stale input");
        }
        outcome
    }

    fn describe(&self) -> String {
        format!("{}{}", crate::config::UNIX_PREFIX, self.path.display())
    }
}

impl std::fmt::Debug for UnixChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnixChannel")
            .field("path", &self.path)
            .finish()
    }
}

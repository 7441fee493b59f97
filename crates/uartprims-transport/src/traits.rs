use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use crate::config::SerialConfig;
use crate::error::Result;
use crate::serial::SerialChannel;

/// A duplex byte stream with bounded-time reads.
///
/// Implementations own the underlying port. Callers hold a channel
/// exclusively (`&mut self`) for the duration of an exchange.
pub trait Channel {
    /// Write all of `bytes` to the device.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Read whatever is available, up to `max_bytes`, waiting at most `timeout`.
    ///
    /// Returns a short or empty buffer (not an error) when the timeout
    /// elapses first. A closed channel is reported as
    /// [`ChannelError::Closed`](crate::ChannelError::Closed).
    fn read(&mut self, max_bytes: usize, timeout: Duration) -> Result<Bytes>;

    /// Drop any bytes already received but not yet read.
    fn discard_input(&mut self) -> Result<()> {
        Ok(())
    }

    /// Human-readable name of the endpoint, for logs and diagnostics.
    fn describe(&self) -> String;
}

impl<C: Channel + ?Sized> Channel for &mut C {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn read(&mut self, max_bytes: usize, timeout: Duration) -> Result<Bytes> {
        (**self).read(max_bytes, timeout)
    }

    fn discard_input(&mut self) -> Result<()> {
        (**self).discard_input()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn read(&mut self, max_bytes: usize, timeout: Duration) -> Result<Bytes> {
        (**self).read(max_bytes, timeout)
    }

    fn discard_input(&mut self) -> Result<()> {
        (**self).discard_input()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Open the channel a configuration names.
///
/// `unix:<path>` connects to an emulator socket; anything else is opened as
/// a serial port.
pub fn open_channel(config: &SerialConfig) -> Result<Box<dyn Channel + Send>> {
    if let Some(path) = config.unix_path() {
        debug!(path, "opening unix socket channel");
        return open_unix(path);
    }
    Ok(Box::new(SerialChannel::open(config)?))
}

#[cfg(unix)]
fn open_unix(path: &str) -> Result<Box<dyn Channel + Send>> {
    Ok(Box::new(crate::uds::UnixChannel::connect(path)?))
}

#[cfg(not(unix))]
fn open_unix(path: &str) -> Result<Box<dyn Channel + Send>> {
    Err(crate::error::ChannelError::Open {
        port: format!("{}{path}", crate::config::UNIX_PREFIX),
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "unix socket channels are not available on this platform",
        ),
    })
}

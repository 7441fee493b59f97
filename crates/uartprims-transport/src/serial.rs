use std::time::Duration;

use bytes::Bytes;
use serialport::{ClearBuffer, SerialPort};
use tracing::{info, trace, warn};

use crate::config::SerialConfig;
use crate::error::{ChannelError, Result};
use crate::io::{read_available, write_fully};
use crate::traits::Channel;

/// A serial port channel.
///
/// Wraps a `serialport` handle. Each [`Channel::read`] reprograms the driver
/// timeout so the caller's deadline, not the open-time timeout, bounds the wait.
pub struct SerialChannel {
    port: Box<dyn SerialPort>,
    name: String,
    timeout: Duration,
}

impl SerialChannel {
    /// Open the port named in `config`.
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let port = serialport::new(&config.port, config.baud_rate)
            .timeout(config.timeout)
            .open()
            .map_err(|err| ChannelError::Open {
                port: config.port.clone(),
                source: err.into(),
            })?;

        info!(port = %config.port, baud_rate = config.baud_rate, "opened serial port");

        Ok(Self {
            port,
            name: config.port.clone(),
            timeout: config.timeout,
        })
    }

    /// Wrap an already-open port.
    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        let name = port.name().unwrap_or_else(|| "serial".to_string());
        let timeout = port.timeout();
        Self {
            port,
            name,
            timeout,
        }
    }

    /// Borrow the underlying port.
    pub fn get_ref(&self) -> &dyn SerialPort {
        self.port.as_ref()
    }

    /// Consume the channel and return the inner port.
    pub fn into_inner(self) -> Box<dyn SerialPort> {
        self.port
    }
}

impl Channel for SerialChannel {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        write_fully(&mut self.port, bytes)
    }

    fn read(&mut self, max_bytes: usize, timeout: Duration) -> Result<Bytes> {
        if timeout.is_zero() {
            return Ok(Bytes::new());
        }
        if timeout != self.timeout {
            self.port.set_timeout(timeout)?;
            self.timeout = timeout;
        }
        let chunk = read_available(&mut self.port, max_bytes)?;
        trace!(port = %self.name, len = chunk.len(), "serial read");
        Ok(chunk)
    }

    fn discard_input(&mut self) -> Result<()> {
        let pending = self.port.bytes_to_read().unwrap_or(0);
        if pending > 0 {
            warn!(port = %self.name, pending, "discarding stale input");
        }
        self.port.clear(ClearBuffer::Input)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

impl std::fmt::Debug for SerialChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialChannel")
            .field("port", &self.name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

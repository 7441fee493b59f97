use std::time::Duration;

use bytes::Bytes;
use tracing::debug;
use uartprims_frame::{Command, DeviceState, DeviceStatus, Response, VersionInfo};
use uartprims_transport::Channel;

use crate::driver::execute;
use crate::error::{CommandError, Result, SessionError};

/// Default time allowed for a reply.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Per-session exchange settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Upper bound on the wait for each reply.
    pub timeout: Duration,
    /// Clear pending input before each request, so a late reply to an
    /// earlier timed-out exchange is not read as this one's.
    pub discard_stale_input: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            discard_stale_input: true,
        }
    }
}

/// A device link: a channel plus exchange settings.
///
/// Holding the channel by value (or `&mut`) serialises exchanges; there is
/// never more than one request in flight.
pub struct Session<C> {
    channel: C,
    config: SessionConfig,
}

impl<C: Channel> Session<C> {
    /// Wrap a channel with default settings.
    pub fn new(channel: C) -> Self {
        Self::with_config(channel, SessionConfig::default())
    }

    pub fn with_config(channel: C, config: SessionConfig) -> Self {
        Self { channel, config }
    }

    /// Send a raw command byte and return the decoded reply, whatever its status.
    pub fn execute(&mut self, cmd: u8, payload: &[u8]) -> Result<Response> {
        if self.config.discard_stale_input {
            self.channel.discard_input().map_err(SessionError::Discard)?;
        }
        execute(&mut self.channel, cmd, payload, self.config.timeout)
    }

    /// Send a catalogued command and return the decoded reply, whatever its status.
    pub fn execute_command(&mut self, command: Command, payload: &[u8]) -> Result<Response> {
        self.execute(command.id(), payload)
    }

    /// Send a command and require a success status.
    ///
    /// Returns the reply data. A nonzero status becomes
    /// [`CommandError::Device`] carrying the diagnostic bytes.
    pub fn request(
        &mut self,
        command: Command,
        payload: &[u8],
    ) -> std::result::Result<Bytes, CommandError> {
        let response = self.execute_command(command, payload)?;
        let status = DeviceStatus::from_code(response.status);
        if !status.is_ok() {
            debug!(%command, %status, "device reported failure");
            return Err(CommandError::Device {
                command,
                status,
                data: response.data,
            });
        }
        Ok(response.data)
    }

    /// PING. Returns whatever the device echoes (firmware sends `PONG`).
    pub fn ping(&mut self) -> std::result::Result<Bytes, CommandError> {
        self.request(Command::Ping, &[])
    }

    /// GET_VERSION.
    pub fn get_version(&mut self) -> std::result::Result<VersionInfo, CommandError> {
        let data = self.request(Command::GetVersion, &[])?;
        VersionInfo::parse(&data).map_err(|source| CommandError::MalformedReply {
            command: Command::GetVersion,
            source,
        })
    }

    /// GET_STATUS.
    pub fn get_status(&mut self) -> std::result::Result<DeviceState, CommandError> {
        let data = self.request(Command::GetStatus, &[])?;
        DeviceState::parse(&data).map_err(|source| CommandError::MalformedReply {
            command: Command::GetStatus,
            source,
        })
    }

    /// Current settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Change the reply timeout for subsequent exchanges.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.config.timeout = timeout;
    }

    /// Borrow the underlying channel.
    pub fn get_ref(&self) -> &C {
        &self.channel
    }

    /// Mutably borrow the underlying channel.
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Consume the session and return the channel.
    pub fn into_inner(self) -> C {
        self.channel
    }
}

impl<C: Channel> std::fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("channel", &self.channel.describe())
            .field("config", &self.config)
            .finish()
    }
}

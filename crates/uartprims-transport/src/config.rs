use std::time::Duration;

/// Default line rate used by the firmware's USB CDC endpoint.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default driver-level timeout applied when the port is opened.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Port-name prefix selecting the Unix socket transport instead of a serial port.
pub const UNIX_PREFIX: &str = "unix:";

/// How to reach a device.
///
/// This is the only place a port name or baud rate lives; nothing below the
/// CLI keeps them in globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Port name (`/dev/ttyACM0`, `COM5`) or `unix:<path>` for an emulator socket.
    pub port: String,
    /// Line rate. Ignored by the Unix socket transport.
    pub baud_rate: u32,
    /// Driver-level timeout for blocking operations on the open port.
    pub timeout: Duration,
}

impl SerialConfig {
    /// Configuration for `port` with default baud rate and timeout.
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The socket path when this configuration names an emulator socket.
    pub fn unix_path(&self) -> Option<&str> {
        self.port.strip_prefix(UNIX_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_defaults() {
        let cfg = SerialConfig::new("/dev/ttyACM0");
        assert_eq!(cfg.baud_rate, 115_200);
        assert_eq!(cfg.timeout, Duration::from_secs(1));
        assert_eq!(cfg.unix_path(), None);
    }

    #[test]
    fn builder_overrides() {
        let cfg = SerialConfig::new("COM5")
            .with_baud_rate(9600)
            .with_timeout(Duration::from_millis(250));
        assert_eq!(cfg.port, "COM5");
        assert_eq!(cfg.baud_rate, 9600);
        assert_eq!(cfg.timeout, Duration::from_millis(250));
    }

    #[test]
    fn unix_prefix_selects_socket_path() {
        let cfg = SerialConfig::new("unix:/tmp/qemu-serial.sock");
        assert_eq!(cfg.unix_path(), Some("/tmp/qemu-serial.sock"));
    }
}

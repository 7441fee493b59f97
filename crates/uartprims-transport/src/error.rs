/// Errors that can occur on a device channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// Failed to open the named port or socket.
    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        source: std::io::Error,
    },

    /// An I/O error occurred while reading or writing.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The serial driver rejected an operation (configuration, buffer clear).
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// The other end closed the channel.
    #[error("channel closed by peer")]
    Closed,

    /// Port discovery found nothing that looks like a device.
    #[error("no serial device found ({scanned} ports scanned)")]
    NoDevice { scanned: usize },
}

pub type Result<T> = std::result::Result<T, ChannelError>;

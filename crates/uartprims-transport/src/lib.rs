//! Byte channel abstraction for talking to a device over a serial link.
//!
//! Provides a unified interface over the ways a host reaches firmware:
//! - Physical or USB CDC serial ports (via `serialport`)
//! - Unix domain sockets exposed by emulators (e.g. QEMU `-serial unix:`)
//!
//! This is the lowest layer of uartprims. The protocol core only ever sees
//! the [`Channel`] trait defined here.

pub mod config;
pub mod discovery;
pub mod error;
mod io;
pub mod serial;
pub mod traits;

#[cfg(unix)]
pub mod uds;

pub use config::{SerialConfig, DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT, UNIX_PREFIX};
pub use discovery::{discover_ports, find_device, looks_like_device, select_device, PortInfo, UsbInfo};
pub use error::{ChannelError, Result};
pub use serial::SerialChannel;
pub use traits::{open_channel, Channel};

#[cfg(unix)]
pub use uds::UnixChannel;

//! Framed command/response protocol for exercising device firmware over serial links.
//!
//! # Crate Structure
//!
//! - [`transport`]: Byte channels: serial ports, emulator sockets, port discovery
//! - [`frame`]: CRC-16 checksum, frame codec, command catalog, reply views
//! - [`session`]: Bounded request/response exchanges and typed command helpers

/// Re-export transport types.
pub mod transport {
    pub use uartprims_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use uartprims_frame::*;
}

/// Re-export session types.
pub mod session {
    pub use uartprims_session::*;
}

pub use uartprims_frame::{build_frame, checksum, parse_response, Command, Frame, Response};
pub use uartprims_session::{execute, Session, SessionConfig};
pub use uartprims_transport::{open_channel, Channel, SerialConfig};

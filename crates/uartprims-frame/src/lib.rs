//! SOF-delimited command/response framing with CRC-16 integrity.
//!
//! This is the protocol core of uartprims. Every frame on the wire is:
//! - A 1-byte start-of-frame marker (0xAA)
//! - A 1-byte length covering the command/status byte and payload
//! - A 1-byte command id (host to device) or status code (device to host)
//! - Up to 254 payload bytes
//! - A 2-byte little-endian CRC-16 over everything after the marker
//!
//! Everything here is pure: no I/O, no shared state.

pub mod checksum;
pub mod codec;
pub mod command;
pub mod error;
pub mod reply;
pub mod status;

pub use checksum::checksum;
pub use codec::{
    build_frame, encode_frame, frame_len_hint, parse_response, Frame, Response, CRC_SIZE,
    HEADER_SIZE, MAX_FRAME_SIZE, MAX_PAYLOAD, MIN_FRAME_SIZE, SOF,
};
pub use command::{command_name, Command};
pub use error::{DecodeError, EncodeError, ReplyError};
pub use reply::{DeviceState, VersionInfo};
pub use status::DeviceStatus;

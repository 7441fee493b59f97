use crate::codec::{MAX_PAYLOAD, MIN_FRAME_SIZE, SOF};

/// Errors building an outbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// LEN is one byte, so the payload must leave room for the command byte.
    #[error("payload too large ({size} bytes, max {max})", max = MAX_PAYLOAD)]
    PayloadTooLarge { size: usize },
}

/// Errors validating an inbound frame.
///
/// Checks run in declaration order; the first failing check is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Fewer bytes than the smallest possible frame.
    #[error("incomplete frame ({len} bytes, need at least {min})", min = MIN_FRAME_SIZE)]
    Incomplete { len: usize },

    /// Byte 0 is not the start-of-frame marker.
    #[error("bad start-of-frame at offset 0: found 0x{found:02X}, expected 0x{sof:02X}", sof = SOF)]
    BadSof { found: u8 },

    /// LEN (offset 1) is zero, leaving no room for the status byte.
    #[error("zero length field at offset 1")]
    ZeroLength,

    /// LEN announces more bytes than the buffer holds.
    #[error("truncated frame: LEN=0x{len_field:02X} needs {expected} bytes, buffer has {actual}")]
    Truncated {
        len_field: u8,
        expected: usize,
        actual: usize,
    },

    /// Recomputed checksum differs from the one on the wire.
    #[error("crc mismatch at offset {offset}: computed 0x{expected:04X}, frame carries 0x{actual:04X}")]
    CrcMismatch {
        expected: u16,
        actual: u16,
        offset: usize,
    },
}

/// Errors interpreting the data of a successful reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReplyError {
    /// The reply carries fewer bytes than the field layout requires.
    #[error("{what} reply too short ({actual} bytes, need {needed})")]
    TooShort {
        what: &'static str,
        needed: usize,
        actual: usize,
    },
}

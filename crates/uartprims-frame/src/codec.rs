use bytes::{BufMut, Bytes, BytesMut};

use crate::checksum::checksum;
use crate::error::{DecodeError, EncodeError};
use crate::status::DeviceStatus;

/// Start-of-frame marker.
pub const SOF: u8 = 0xAA;

/// SOF + LEN + CMD/status.
pub const HEADER_SIZE: usize = 3;

/// Trailing CRC-16, little-endian.
pub const CRC_SIZE: usize = 2;

/// Smallest valid frame: header and CRC around an empty payload.
pub const MIN_FRAME_SIZE: usize = HEADER_SIZE + CRC_SIZE;

/// Largest payload: LEN is one byte and also counts the command byte.
pub const MAX_PAYLOAD: usize = u8::MAX as usize - 1;

/// Largest frame on the wire.
pub const MAX_FRAME_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD + CRC_SIZE;

/// An encoded, checksum-protected outbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Bytes,
}

impl Frame {
    /// The encoded wire bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total size on the wire.
    pub fn wire_size(&self) -> usize {
        self.bytes.len()
    }

    /// The command byte.
    pub fn command(&self) -> u8 {
        self.bytes[2]
    }

    /// The payload between the command byte and the CRC.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..self.bytes.len() - CRC_SIZE]
    }

    /// The CRC carried in the trailer.
    pub fn checksum(&self) -> u16 {
        let at = self.bytes.len() - CRC_SIZE;
        u16::from_le_bytes([self.bytes[at], self.bytes[at + 1]])
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// A validated inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status byte reported by the device; 0 is success.
    pub status: u8,
    /// The LEN-1 bytes following the status byte.
    pub data: Bytes,
}

impl Response {
    pub fn new(status: u8, data: impl Into<Bytes>) -> Self {
        Self {
            status,
            data: data.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// Typed view of the status byte.
    pub fn device_status(&self) -> DeviceStatus {
        DeviceStatus::from_code(self.status)
    }

    /// Bytes this response occupied on the wire.
    pub fn wire_len(&self) -> usize {
        HEADER_SIZE + self.data.len() + CRC_SIZE
    }
}

/// Encode a frame into `dst`.
///
/// Wire format:
/// ```text
/// ┌──────┬─────┬─────┬──────────────┬────────┬────────┐
/// │ SOF  │ LEN │ CMD │ PAYLOAD      │ CRC_LO │ CRC_HI │
/// │ 0xAA │ n+1 │     │ (n bytes)    │        │        │
/// └──────┴─────┴─────┴──────────────┴────────┴────────┘
///         └──────── CRC-16 input ───┘
/// ```
pub fn encode_frame(cmd: u8, payload: &[u8], dst: &mut BytesMut) -> Result<(), EncodeError> {
    if payload.len() > MAX_PAYLOAD {
        return Err(EncodeError::PayloadTooLarge {
            size: payload.len(),
        });
    }

    dst.reserve(HEADER_SIZE + payload.len() + CRC_SIZE);
    let start = dst.len();
    dst.put_u8(SOF);
    dst.put_u8((payload.len() + 1) as u8);
    dst.put_u8(cmd);
    dst.put_slice(payload);

    let crc = checksum(&dst[start + 1..]);
    dst.put_u16_le(crc);
    Ok(())
}

/// Build a standalone frame for `cmd` carrying `payload`.
pub fn build_frame(cmd: u8, payload: &[u8]) -> Result<Frame, EncodeError> {
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len() + CRC_SIZE);
    encode_frame(cmd, payload, &mut buf)?;
    Ok(Frame {
        bytes: buf.freeze(),
    })
}

/// Total frame size announced by a buffer's header, if it has one yet.
///
/// Needs SOF and LEN. Returns `None` for fewer than two bytes or when byte 0
/// is not [`SOF`].
pub fn frame_len_hint(buffer: &[u8]) -> Option<usize> {
    match buffer {
        [SOF, len, ..] => Some(2 + *len as usize + CRC_SIZE),
        _ => None,
    }
}

/// Validate and decode a response frame at the start of `buffer`.
///
/// Bytes past the end of the frame LEN delimits are ignored. No scanning for
/// a later SOF is attempted.
pub fn parse_response(buffer: &[u8]) -> Result<Response, DecodeError> {
    if buffer.len() < MIN_FRAME_SIZE {
        return Err(DecodeError::Incomplete { len: buffer.len() });
    }

    if buffer[0] != SOF {
        return Err(DecodeError::BadSof { found: buffer[0] });
    }

    let len_field = buffer[1];
    if len_field == 0 {
        return Err(DecodeError::ZeroLength);
    }

    let data_end = HEADER_SIZE + len_field as usize - 1;
    let expected = data_end + CRC_SIZE;
    if buffer.len() < expected {
        return Err(DecodeError::Truncated {
            len_field,
            expected,
            actual: buffer.len(),
        });
    }

    let computed = checksum(&buffer[1..data_end]);
    let received = u16::from_le_bytes([buffer[data_end], buffer[data_end + 1]]);
    if computed != received {
        return Err(DecodeError::CrcMismatch {
            expected: computed,
            actual: received,
            offset: data_end,
        });
    }

    Ok(Response {
        status: buffer[2],
        data: Bytes::copy_from_slice(&buffer[HEADER_SIZE..data_end]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a device-side reply: the status byte takes the command slot.
    fn reply(status: u8, data: &[u8]) -> Vec<u8> {
        build_frame(status, data).unwrap().as_bytes().to_vec()
    }

    #[test]
    fn ping_frame_matches_reference_vector() {
        let frame = build_frame(0x01, b"").unwrap();
        assert_eq!(frame.as_bytes(), &[0xAA, 0x01, 0x01, 0xC1, 0xE0]);
        assert_eq!(frame.checksum(), 0xE0C1);
        assert_eq!(frame.command(), 0x01);
        assert!(frame.payload().is_empty());
    }

    #[test]
    fn version_reply_reference_vector() {
        let wire = [0xAA, 0x04, 0x00, 0x01, 0x02, 0x03, 0xC5, 0x61];
        let resp = parse_response(&wire).unwrap();
        assert_eq!(resp.status, 0);
        assert_eq!(resp.data.as_ref(), &[1, 2, 3]);
        assert_eq!(resp.wire_len(), wire.len());
        assert!(resp.is_success());
    }

    #[test]
    fn frame_layout() {
        let frame = build_frame(0x20, &[0x05, 0x00, 0x00, 0x00]).unwrap();
        let bytes = frame.as_bytes();
        assert_eq!(bytes[0], SOF);
        assert_eq!(bytes[1], 5);
        assert_eq!(bytes[2], 0x20);
        assert_eq!(&bytes[3..7], &[0x05, 0x00, 0x00, 0x00]);
        assert_eq!(frame.wire_size(), 9);
        assert_eq!(frame.payload(), &[0x05, 0x00, 0x00, 0x00]);
        assert_eq!(frame.checksum(), checksum(&bytes[1..7]));
    }

    #[test]
    fn roundtrip_recovers_fields() {
        for size in [0usize, 1, 2, 17, 128, MAX_PAYLOAD] {
            let payload: Vec<u8> = (0..size).map(|i| (i * 7) as u8).collect();
            let cmd = (size % 251) as u8;
            let frame = build_frame(cmd, &payload).unwrap();
            let resp = parse_response(frame.as_bytes()).unwrap();
            assert_eq!(resp.status, cmd);
            assert_eq!(resp.data.as_ref(), payload.as_slice());
        }
    }

    #[test]
    fn max_payload_boundary() {
        let at_limit = vec![0x5A; MAX_PAYLOAD];
        let frame = build_frame(0x03, &at_limit).unwrap();
        assert_eq!(frame.as_bytes()[1], 0xFF);
        assert_eq!(frame.wire_size(), MAX_FRAME_SIZE);

        let over = vec![0x5A; MAX_PAYLOAD + 1];
        assert_eq!(
            build_frame(0x03, &over),
            Err(EncodeError::PayloadTooLarge { size: 255 })
        );
    }

    #[test]
    fn encode_appends_to_existing_buffer() {
        let mut buf = BytesMut::from(&b"junk"[..]);
        encode_frame(0x01, b"", &mut buf).unwrap();
        assert_eq!(&buf[..4], b"junk");
        assert_eq!(&buf[4..], &[0xAA, 0x01, 0x01, 0xC1, 0xE0]);
    }

    #[test]
    fn flipped_bit_in_cmd_or_payload_is_crc_mismatch() {
        let original = reply(0x00, b"PONG");
        let crc_at = original.len() - CRC_SIZE;
        for byte in 2..crc_at {
            for bit in 0..8 {
                let mut corrupted = original.clone();
                corrupted[byte] ^= 1 << bit;
                let err = parse_response(&corrupted).unwrap_err();
                assert!(
                    matches!(err, DecodeError::CrcMismatch { offset, .. } if offset == crc_at),
                    "byte {byte} bit {bit}: {err:?}"
                );
            }
        }
    }

    #[test]
    fn flipped_bit_in_len_never_decodes() {
        let original = reply(0x00, b"PONG");
        for bit in 0..8 {
            let mut corrupted = original.clone();
            corrupted[1] ^= 1 << bit;
            assert!(parse_response(&corrupted).is_err(), "LEN bit {bit}");
        }
    }

    #[test]
    fn flipped_bit_in_len_of_minimal_frame() {
        let original = reply(0x00, b"");
        let mut zeroed = original.clone();
        zeroed[1] ^= 0x01;
        assert_eq!(parse_response(&zeroed), Err(DecodeError::ZeroLength));

        let mut grown = original;
        grown[1] ^= 0x02;
        assert!(matches!(
            parse_response(&grown),
            Err(DecodeError::Truncated { len_field: 3, expected: 7, actual: 5 })
        ));
    }

    #[test]
    fn corrupted_crc_bytes_reported_with_both_values() {
        let mut wire = reply(0x00, &[1, 2, 3]);
        let last = wire.len() - 1;
        wire[last] ^= 0xFF;
        match parse_response(&wire).unwrap_err() {
            DecodeError::CrcMismatch {
                expected,
                actual,
                offset,
            } => {
                assert_eq!(expected, 0x61C5);
                assert_eq!(actual, 0x9EC5);
                assert_eq!(offset, 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn prefixes_of_minimal_frame_are_rejected() {
        let minimal = reply(0x00, b"");
        for n in 0..MIN_FRAME_SIZE {
            let err = parse_response(&minimal[..n]).unwrap_err();
            assert!(
                matches!(
                    err,
                    DecodeError::Incomplete { .. } | DecodeError::Truncated { .. }
                ),
                "prefix {n}: {err:?}"
            );
        }
    }

    #[test]
    fn prefixes_of_longer_frame_are_truncated() {
        let wire = reply(0x00, b"hello world");
        for n in MIN_FRAME_SIZE..wire.len() {
            assert!(matches!(
                parse_response(&wire[..n]),
                Err(DecodeError::Truncated { .. })
            ));
        }
    }

    #[test]
    fn bad_sof_regardless_of_content() {
        let mut wire = reply(0x00, &[1, 2, 3]);
        for first in [0x00u8, 0x55, 0xAB, 0xFF] {
            wire[0] = first;
            assert_eq!(
                parse_response(&wire),
                Err(DecodeError::BadSof { found: first })
            );
        }
        assert_eq!(
            parse_response(&[0x00; 16]),
            Err(DecodeError::BadSof { found: 0x00 })
        );
    }

    #[test]
    fn no_resync_past_leading_garbage() {
        let mut wire = vec![0x00];
        wire.extend_from_slice(&reply(0x00, b"PONG"));
        assert_eq!(
            parse_response(&wire),
            Err(DecodeError::BadSof { found: 0x00 })
        );
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut wire = reply(0x00, &[7]);
        let frame_len = wire.len();
        wire.extend_from_slice(&[0xAA, 0x01]);
        let resp = parse_response(&wire).unwrap();
        assert_eq!(resp.data.as_ref(), &[7]);
        assert_eq!(resp.wire_len(), frame_len);
    }

    #[test]
    fn nonzero_status_is_decoded_not_rejected() {
        let wire = reply(0x02, b"");
        let resp = parse_response(&wire).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.device_status(), DeviceStatus::InvalidCommand);
    }

    #[test]
    fn len_hint_needs_sof_and_len() {
        assert_eq!(frame_len_hint(&[]), None);
        assert_eq!(frame_len_hint(&[SOF]), None);
        assert_eq!(frame_len_hint(&[0x00, 0x04]), None);
        assert_eq!(frame_len_hint(&[SOF, 0x01]), Some(5));
        assert_eq!(frame_len_hint(&[SOF, 0x04, 0x00]), Some(8));
    }
}

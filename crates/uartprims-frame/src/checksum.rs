//! CRC-16 as computed by the device firmware.
//!
//! Reflected polynomial 0xA001 (0x8005 bit-reversed), initial value 0xFFFF,
//! no final XOR. This is the CRC-16/MODBUS variant. It must stay bit-for-bit
//! identical to the firmware's implementation.

/// Reflected generator polynomial.
pub const POLYNOMIAL: u16 = 0xA001;

/// Register value before the first byte.
pub const INITIAL: u16 = 0xFFFF;

/// Compute the frame checksum over `bytes`.
///
/// Empty input returns [`INITIAL`].
pub fn checksum(bytes: &[u8]) -> u16 {
    bytes.iter().fold(INITIAL, |crc, &byte| update(crc, byte))
}

/// Fold one byte into a running register.
pub fn update(mut crc: u16, byte: u8) -> u16 {
    crc ^= u16::from(byte);
    for _ in 0..8 {
        if crc & 1 != 0 {
            crc = (crc >> 1) ^ POLYNOMIAL;
        } else {
            crc >>= 1;
        }
    }
    crc
}

use std::fmt;

/// Status byte of a device reply.
///
/// The mapping is total: unrecognised codes are kept as [`DeviceStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceStatus {
    Ok,
    Error,
    InvalidCommand,
    Locked,
    NeedConfirm,
    InvalidPin,
    InvalidSignature,
    SessionExpired,
    Unknown(u8),
}

impl DeviceStatus {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => DeviceStatus::Ok,
            0x01 => DeviceStatus::Error,
            0x02 => DeviceStatus::InvalidCommand,
            0x03 => DeviceStatus::Locked,
            0x04 => DeviceStatus::NeedConfirm,
            0x05 => DeviceStatus::InvalidPin,
            0x06 => DeviceStatus::InvalidSignature,
            0x07 => DeviceStatus::SessionExpired,
            other => DeviceStatus::Unknown(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            DeviceStatus::Ok => 0x00,
            DeviceStatus::Error => 0x01,
            DeviceStatus::InvalidCommand => 0x02,
            DeviceStatus::Locked => 0x03,
            DeviceStatus::NeedConfirm => 0x04,
            DeviceStatus::InvalidPin => 0x05,
            DeviceStatus::InvalidSignature => 0x06,
            DeviceStatus::SessionExpired => 0x07,
            DeviceStatus::Unknown(code) => code,
        }
    }

    pub fn is_ok(self) -> bool {
        self == DeviceStatus::Ok
    }

    pub fn name(self) -> &'static str {
        match self {
            DeviceStatus::Ok => "OK",
            DeviceStatus::Error => "ERROR",
            DeviceStatus::InvalidCommand => "INVALID_COMMAND",
            DeviceStatus::Locked => "LOCKED",
            DeviceStatus::NeedConfirm => "NEED_CONFIRM",
            DeviceStatus::InvalidPin => "INVALID_PIN",
            DeviceStatus::InvalidSignature => "INVALID_SIGNATURE",
            DeviceStatus::SessionExpired => "SESSION_EXPIRED",
            DeviceStatus::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_roundtrips() {
        for code in 0..=u8::MAX {
            assert_eq!(DeviceStatus::from_code(code).code(), code);
        }
    }

    #[test]
    fn only_zero_is_ok() {
        assert!(DeviceStatus::from_code(0).is_ok());
        assert!(!DeviceStatus::from_code(1).is_ok());
        assert_eq!(DeviceStatus::from_code(0x42), DeviceStatus::Unknown(0x42));
    }

    #[test]
    fn display_includes_code() {
        assert_eq!(DeviceStatus::InvalidCommand.to_string(), "INVALID_COMMAND (0x02)");
        assert_eq!(DeviceStatus::Unknown(0x99).to_string(), "UNKNOWN (0x99)");
    }
}

//! Typed views of GET_VERSION and GET_STATUS reply data.

use std::fmt;

use crate::error::ReplyError;

/// Firmware version reported by GET_VERSION.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    /// Trailing UTF-8 label (crypto library version). Invalid sequences are
    /// replaced, never rejected. Empty when the firmware sends none.
    pub label: String,
}

impl VersionInfo {
    /// Interpret reply data: `major, minor, patch, label...`.
    pub fn parse(data: &[u8]) -> Result<Self, ReplyError> {
        match data {
            [major, minor, patch, label @ ..] => Ok(Self {
                major: *major,
                minor: *minor,
                patch: *patch,
                label: String::from_utf8_lossy(label).into_owned(),
            }),
            _ => Err(ReplyError::TooShort {
                what: "GET_VERSION",
                needed: 3,
                actual: data.len(),
            }),
        }
    }

    /// `major.minor.patch`, without the label.
    pub fn semver(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.label.is_empty() {
            write!(f, " ({})", self.label)?;
        }
        Ok(())
    }
}

/// Wallet state reported by GET_STATUS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceState {
    Disconnected,
    Locked,
    Unlocked,
    /// A code this host does not know; reported, not rejected.
    Unknown(u8),
}

impl DeviceState {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => DeviceState::Disconnected,
            1 => DeviceState::Locked,
            2 => DeviceState::Unlocked,
            other => DeviceState::Unknown(other),
        }
    }

    /// Interpret reply data: the first byte is the state code.
    pub fn parse(data: &[u8]) -> Result<Self, ReplyError> {
        data.first()
            .copied()
            .map(Self::from_code)
            .ok_or(ReplyError::TooShort {
                what: "GET_STATUS",
                needed: 1,
                actual: 0,
            })
    }

    pub fn code(self) -> u8 {
        match self {
            DeviceState::Disconnected => 0,
            DeviceState::Locked => 1,
            DeviceState::Unlocked => 2,
            DeviceState::Unknown(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DeviceState::Disconnected => "Disconnected",
            DeviceState::Locked => "Locked",
            DeviceState::Unlocked => "Unlocked",
            DeviceState::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceState::Unknown(code) => write!(f, "Unknown ({code})"),
            known => f.write_str(known.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_without_label() {
        let v = VersionInfo::parse(&[1, 2, 3]).unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
        assert!(v.label.is_empty());
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn version_with_label() {
        let v = VersionInfo::parse(b"\x00\x01\x00librecipher-0.3").unwrap();
        assert_eq!(v.semver(), "0.1.0");
        assert_eq!(v.label, "librecipher-0.3");
        assert_eq!(v.to_string(), "0.1.0 (librecipher-0.3)");
    }

    #[test]
    fn version_label_decoded_lossily() {
        let v = VersionInfo::parse(&[2, 0, 0, b'o', b'k', 0xFF, b'!']).unwrap();
        assert_eq!(v.label, "ok\u{FFFD}!");
    }

    #[test]
    fn version_too_short() {
        assert_eq!(
            VersionInfo::parse(&[1, 2]),
            Err(ReplyError::TooShort {
                what: "GET_VERSION",
                needed: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn state_mapping() {
        assert_eq!(DeviceState::parse(&[0]).unwrap(), DeviceState::Disconnected);
        assert_eq!(DeviceState::parse(&[1]).unwrap(), DeviceState::Locked);
        assert_eq!(DeviceState::parse(&[2, 0xEE]).unwrap(), DeviceState::Unlocked);
        assert_eq!(DeviceState::parse(&[9]).unwrap(), DeviceState::Unknown(9));
        assert_eq!(DeviceState::Unknown(9).to_string(), "Unknown (9)");
    }

    #[test]
    fn state_requires_a_byte() {
        assert!(matches!(
            DeviceState::parse(&[]),
            Err(ReplyError::TooShort { needed: 1, .. })
        ));
    }
}

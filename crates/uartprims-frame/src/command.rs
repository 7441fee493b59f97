//! Command catalog.
//!
//! Ids 0x01-0x0F are diagnostic commands the host interprets. Higher ids
//! belong to wallet operations; the host only names them.

use std::fmt;

/// Known command ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Liveness check; firmware answers `PONG`.
    Ping = 0x01,
    /// Firmware version: major, minor, patch, optional UTF-8 label.
    GetVersion = 0x02,
    /// One-byte wallet state.
    GetStatus = 0x03,
    CreateWallet = 0x10,
    Unlock = 0x11,
    Lock = 0x12,
    GetAddress = 0x20,
    SignTransaction = 0x21,
    VerifySignature = 0x22,
    InitSession = 0x30,
    CloseSession = 0x31,
}

impl Command {
    /// Every catalogued command, in id order.
    pub const ALL: [Command; 11] = [
        Command::Ping,
        Command::GetVersion,
        Command::GetStatus,
        Command::CreateWallet,
        Command::Unlock,
        Command::Lock,
        Command::GetAddress,
        Command::SignTransaction,
        Command::VerifySignature,
        Command::InitSession,
        Command::CloseSession,
    ];

    /// Wire id.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a wire id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.id() == id)
    }

    /// Upper-case symbolic name, as used in logs and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Command::Ping => "PING",
            Command::GetVersion => "GET_VERSION",
            Command::GetStatus => "GET_STATUS",
            Command::CreateWallet => "CREATE_WALLET",
            Command::Unlock => "UNLOCK",
            Command::Lock => "LOCK",
            Command::GetAddress => "GET_ADDRESS",
            Command::SignTransaction => "SIGN_TRANSACTION",
            Command::VerifySignature => "VERIFY_SIGNATURE",
            Command::InitSession => "INIT_SESSION",
            Command::CloseSession => "CLOSE_SESSION",
        }
    }

    /// Look up a symbolic name (case-insensitive, `-` accepted for `_`).
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL.into_iter().find(|cmd| cmd.name() == wanted)
    }
}

/// Human-readable label for any command byte.
pub fn command_name(id: u8) -> &'static str {
    Command::from_id(id).map_or("UNKNOWN", Command::name)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), self.id())
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> Self {
        cmd.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_ids_are_fixed() {
        assert_eq!(Command::Ping.id(), 0x01);
        assert_eq!(Command::GetVersion.id(), 0x02);
        assert_eq!(Command::GetStatus.id(), 0x03);
    }

    #[test]
    fn id_lookup_roundtrips() {
        for cmd in Command::ALL {
            assert_eq!(Command::from_id(cmd.id()), Some(cmd));
        }
        assert_eq!(Command::from_id(0x00), None);
        assert_eq!(Command::from_id(0xFF), None);
    }

    #[test]
    fn name_lookup_is_lenient() {
        assert_eq!(Command::from_name("ping"), Some(Command::Ping));
        assert_eq!(Command::from_name("get-version"), Some(Command::GetVersion));
        assert_eq!(Command::from_name(" GET_STATUS "), Some(Command::GetStatus));
        assert_eq!(Command::from_name("reboot"), None);
    }

    #[test]
    fn labels_for_raw_ids() {
        assert_eq!(command_name(0x12), "LOCK");
        assert_eq!(command_name(0x7F), "UNKNOWN");
        assert_eq!(Command::GetStatus.to_string(), "GET_STATUS (0x03)");
    }
}

//! Serial port enumeration and device selection.

use serialport::SerialPortType;
use tracing::debug;

use crate::error::{ChannelError, Result};

/// USB descriptor details for a port backed by a USB device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsbInfo {
    pub vid: u16,
    pub pid: u16,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

/// A port reported by the operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub name: String,
    /// Present when the port is a USB device (CDC ACM, USB-serial bridge).
    pub usb: Option<UsbInfo>,
}

impl PortInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usb: None,
        }
    }
}

/// List the serial ports visible to this host.
pub fn discover_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports()?;
    let ports: Vec<PortInfo> = ports
        .into_iter()
        .map(|port| {
            let usb = match port.port_type {
                SerialPortType::UsbPort(info) => Some(UsbInfo {
                    vid: info.vid,
                    pid: info.pid,
                    serial_number: info.serial_number,
                    manufacturer: info.manufacturer,
                    product: info.product,
                }),
                _ => None,
            };
            PortInfo {
                name: port.port_name,
                usb,
            }
        })
        .collect();
    debug!(count = ports.len(), "enumerated serial ports");
    Ok(ports)
}

/// Whether a port name looks like a USB CDC or USB-serial device.
pub fn looks_like_device(name: &str) -> bool {
    let base = name.rsplit('/').next().unwrap_or(name);
    base.starts_with("ttyACM")
        || base.starts_with("ttyUSB")
        || base.starts_with("cu.usbmodem")
        || base.starts_with("cu.usbserial")
        || base.starts_with("COM")
}

/// Pick the most plausible device port.
///
/// USB-backed ports with a device-like name win over name-only matches.
pub fn select_device(ports: &[PortInfo]) -> Option<&PortInfo> {
    ports
        .iter()
        .find(|p| p.usb.is_some() && looks_like_device(&p.name))
        .or_else(|| ports.iter().find(|p| looks_like_device(&p.name)))
}

/// Discover ports and return the first plausible device.
pub fn find_device() -> Result<PortInfo> {
    let ports = discover_ports()?;
    select_device(&ports)
        .cloned()
        .ok_or(ChannelError::NoDevice {
            scanned: ports.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usb(name: &str) -> PortInfo {
        PortInfo {
            name: name.to_string(),
            usb: Some(UsbInfo {
                vid: 0x2e8a,
                pid: 0x000a,
                serial_number: None,
                manufacturer: Some("Raspberry Pi".to_string()),
                product: None,
            }),
        }
    }

    #[test]
    fn device_name_heuristics() {
        assert!(looks_like_device("/dev/ttyACM0"));
        assert!(looks_like_device("/dev/ttyUSB3"));
        assert!(looks_like_device("/dev/cu.usbmodem14101"));
        assert!(looks_like_device("COM5"));
        assert!(!looks_like_device("/dev/ttyS0"));
        assert!(!looks_like_device("/dev/cu.Bluetooth-Incoming-Port"));
    }

    #[test]
    fn select_prefers_usb_backed_ports() {
        let ports = vec![PortInfo::new("/dev/ttyACM1"), usb("/dev/ttyACM0")];
        assert_eq!(select_device(&ports).unwrap().name, "/dev/ttyACM0");
    }

    #[test]
    fn select_falls_back_to_name_match() {
        let ports = vec![PortInfo::new("/dev/ttyS0"), PortInfo::new("/dev/ttyUSB0")];
        assert_eq!(select_device(&ports).unwrap().name, "/dev/ttyUSB0");
    }

    #[test]
    fn select_none_when_nothing_matches() {
        let ports = vec![PortInfo::new("/dev/ttyS0"), usb("/dev/ttyS1")];
        assert!(select_device(&ports).is_none());
    }
}

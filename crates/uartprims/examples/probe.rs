//! Probe a device: PING, GET_VERSION and GET_STATUS through one session.
//!
//! Run with:
//!   cargo run --example probe -- /dev/ttyACM0
//!   cargo run --example probe -- unix:/tmp/uartprims-emulated-<pid>/device.sock
//!
//! With no argument the first USB CDC-looking port is used.

use std::time::Duration;

use uartprims::transport::find_device;
use uartprims::{open_channel, Channel, SerialConfig, Session};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let port = match std::env::args().nth(1) {
        Some(port) => port,
        None => find_device()?.name,
    };

    let config = SerialConfig::new(port).with_timeout(Duration::from_millis(500));
    let channel = open_channel(&config)?;
    let mut session = Session::new(channel);
    eprintln!("Probing {}", session.get_ref().describe());

    let pong = session.ping()?;
    println!("ping: {}", String::from_utf8_lossy(&pong));

    let version = session.get_version()?;
    println!("firmware: {version}");

    let state = session.get_status()?;
    println!("state: {state}");

    Ok(())
}

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod fw_version;
pub mod link;
pub mod ping;
pub mod ports;
pub mod selftest;
pub mod send;
pub mod status;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List serial ports and mark likely devices.
    Ports(PortsArgs),
    /// Send PING and print the echo.
    Ping(PingArgs),
    /// Query the firmware version (GET_VERSION).
    FwVersion(FwVersionArgs),
    /// Query the device state (GET_STATUS).
    Status(StatusArgs),
    /// Send an arbitrary command and print the raw reply.
    Send(SendArgs),
    /// Run PING, GET_VERSION and GET_STATUS and report each.
    Selftest(SelftestArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Ports(args) => ports::run(args, format),
        Command::Ping(args) => ping::run(args, format),
        Command::FwVersion(args) => fw_version::run(args, format),
        Command::Status(args) => status::run(args, format),
        Command::Send(args) => send::run(args, format),
        Command::Selftest(args) => selftest::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// How to reach the device. Shared by every subcommand that talks to one.
#[derive(Args, Debug, Clone)]
pub struct LinkArgs {
    /// Serial port, or `unix:<path>` for an emulator socket.
    /// Auto-detected when omitted.
    #[arg(long, short = 'p', env = "UARTPRIMS_PORT")]
    pub port: Option<String>,
    /// Baud rate (ignored for USB CDC and sockets).
    #[arg(long, short = 'b', default_value_t = uartprims_transport::DEFAULT_BAUD_RATE)]
    pub baud: u32,
    /// Reply timeout (e.g. 1s, 250ms).
    #[arg(long, short = 't', default_value = "1s")]
    pub timeout: String,
}

#[derive(Args, Debug, Default)]
pub struct PortsArgs {
    /// Include ports that do not look like devices.
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct PingArgs {
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug)]
pub struct FwVersionArgs {
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// Command id (decimal or 0x-prefixed hex) or name, e.g. `ping`, `get-version`.
    #[arg(long, short = 'c')]
    pub cmd: String,
    /// Payload as hex bytes.
    #[arg(long, conflicts_with = "data")]
    pub hex: Option<String>,
    /// Payload as a raw string.
    #[arg(long, conflicts_with = "hex")]
    pub data: Option<String>,
}

#[derive(Args, Debug)]
pub struct SelftestArgs {
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

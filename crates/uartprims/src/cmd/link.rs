use std::time::Duration;

use tracing::info;
use uartprims_session::{Session, SessionConfig};
use uartprims_transport::{find_device, open_channel, Channel, SerialConfig};

use crate::cmd::LinkArgs;
use crate::exit::{channel_error, CliError, CliResult, USAGE};

pub type DeviceSession = Session<Box<dyn Channel + Send>>;

/// An open device session plus the port it was opened on.
pub struct Link {
    pub port: String,
    pub session: DeviceSession,
}

pub fn open_link(args: &LinkArgs) -> CliResult<Link> {
    let timeout = parse_duration(&args.timeout)?;
    let port = match &args.port {
        Some(port) => port.clone(),
        None => {
            let found = find_device().map_err(|err| channel_error("port discovery failed", err))?;
            info!(port = %found.name, "auto-detected device port");
            found.name
        }
    };

    let config = SerialConfig::new(port.clone())
        .with_baud_rate(args.baud)
        .with_timeout(timeout);
    let channel = open_channel(&config).map_err(|err| channel_error("open failed", err))?;
    let session = Session::with_config(
        channel,
        SessionConfig {
            timeout,
            ..SessionConfig::default()
        },
    );

    Ok(Link { port, session })
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::TRANSPORT_ERROR;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert_eq!(parse_duration("0s").unwrap_err().code, USAGE);
        assert_eq!(parse_duration("bad").unwrap_err().code, USAGE);
        assert_eq!(parse_duration("").unwrap_err().code, USAGE);
    }

    #[cfg(unix)]
    #[test]
    fn missing_socket_is_transport_error() {
        let args = LinkArgs {
            port: Some("unix:/nonexistent/uartprims-link-test.sock".to_string()),
            baud: 115_200,
            timeout: "100ms".to_string(),
        };
        let err = open_link(&args).err().expect("open should fail");
        assert_eq!(err.code, TRANSPORT_ERROR);
    }
}

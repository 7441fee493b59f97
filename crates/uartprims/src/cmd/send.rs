use tracing::debug;
use uartprims_frame::{Command, DeviceStatus, MAX_PAYLOAD};

use crate::cmd::link::open_link;
use crate::cmd::SendArgs;
use crate::exit::{session_error, CliError, CliResult, FAILURE, SUCCESS, USAGE};
use crate::output::{print_response, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let cmd = parse_command(&args.cmd)?;
    let payload = resolve_payload(&args)?;
    let mut link = open_link(&args.link)?;

    let response = link
        .session
        .execute(cmd, &payload)
        .map_err(|err| session_error("send failed", err))?;
    print_response(&link.port, cmd, &response, format);

    if response.is_success() {
        Ok(SUCCESS)
    } else {
        debug!(
            status = %DeviceStatus::from_code(response.status),
            "device reported failure"
        );
        Ok(FAILURE)
    }
}

/// Accept a decimal id, a `0x`-prefixed hex id, or a command name.
fn parse_command(input: &str) -> CliResult<u8> {
    let input = input.trim();
    let parsed = if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        u8::from_str_radix(hex, 16).ok()
    } else if input.chars().all(|c| c.is_ascii_digit()) {
        input.parse::<u8>().ok()
    } else {
        Command::from_name(input).map(Command::id)
    };
    parsed.ok_or_else(|| CliError::new(USAGE, format!("unknown command: {input}")))
}

fn resolve_payload(args: &SendArgs) -> CliResult<Vec<u8>> {
    let payload = if let Some(text) = &args.hex {
        let compact: String = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ':')
            .collect();
        hex::decode(&compact)
            .map_err(|err| CliError::new(USAGE, format!("--hex is not valid hex: {err}")))?
    } else if let Some(data) = &args.data {
        data.as_bytes().to_vec()
    } else {
        Vec::new()
    };

    if payload.len() > MAX_PAYLOAD {
        return Err(CliError::new(
            USAGE,
            format!(
                "payload is {} bytes, at most {MAX_PAYLOAD} fit in a frame",
                payload.len()
            ),
        ));
    }
    Ok(payload)
}

use std::time::Instant;

use serde::Serialize;

use crate::cmd::link::open_link;
use crate::cmd::PingArgs;
use crate::exit::{command_error, CliResult, SUCCESS};
use crate::output::{data_preview, print_fields, schema_id, text_preview, OutputFormat};

#[derive(Debug, Serialize)]
struct PingOutput<'a> {
    schema_id: String,
    port: &'a str,
    reply_hex: String,
    reply_text: Option<String>,
    round_trip_ms: u128,
}

pub fn run(args: PingArgs, format: OutputFormat) -> CliResult<i32> {
    let mut link = open_link(&args.link)?;

    let started = Instant::now();
    let reply = link
        .session
        .ping()
        .map_err(|err| command_error("ping failed", err))?;
    let elapsed = started.elapsed();

    let out = PingOutput {
        schema_id: schema_id("ping"),
        port: &link.port,
        reply_hex: hex::encode(&reply),
        reply_text: text_preview(&reply),
        round_trip_ms: elapsed.as_millis(),
    };
    let rows = [
        ("port", link.port.clone()),
        ("reply", data_preview(&reply)),
        ("rtt", format!("{elapsed:?}")),
    ];
    print_fields(&out, &rows, format);

    Ok(SUCCESS)
}

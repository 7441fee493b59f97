use serde::Serialize;

use crate::cmd::link::open_link;
use crate::cmd::StatusArgs;
use crate::exit::{command_error, CliResult, SUCCESS};
use crate::output::{print_fields, schema_id, OutputFormat};

#[derive(Debug, Serialize)]
struct StatusOutput<'a> {
    schema_id: String,
    port: &'a str,
    state: &'static str,
    code: u8,
}

pub fn run(args: StatusArgs, format: OutputFormat) -> CliResult<i32> {
    let mut link = open_link(&args.link)?;
    let state = link
        .session
        .get_status()
        .map_err(|err| command_error("GET_STATUS failed", err))?;

    let out = StatusOutput {
        schema_id: schema_id("status"),
        port: &link.port,
        state: state.name(),
        code: state.code(),
    };
    let rows = [("port", link.port.clone()), ("state", state.to_string())];
    print_fields(&out, &rows, format);

    Ok(SUCCESS)
}

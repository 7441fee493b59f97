use serde::Serialize;

use crate::cmd::link::open_link;
use crate::cmd::FwVersionArgs;
use crate::exit::{command_error, CliResult, SUCCESS};
use crate::output::{print_fields, schema_id, OutputFormat};

#[derive(Debug, Serialize)]
struct FwVersionOutput<'a> {
    schema_id: String,
    port: &'a str,
    version: String,
    major: u8,
    minor: u8,
    patch: u8,
    label: &'a str,
}

pub fn run(args: FwVersionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut link = open_link(&args.link)?;
    let version = link
        .session
        .get_version()
        .map_err(|err| command_error("GET_VERSION failed", err))?;

    let out = FwVersionOutput {
        schema_id: schema_id("fw-version"),
        port: &link.port,
        version: version.semver(),
        major: version.major,
        minor: version.minor,
        patch: version.patch,
        label: &version.label,
    };
    let mut rows = vec![("port", link.port.clone()), ("version", version.semver())];
    if !version.label.is_empty() {
        rows.push(("label", version.label.clone()));
    }
    print_fields(&out, &rows, format);

    Ok(SUCCESS)
}

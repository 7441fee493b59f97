use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use uartprims_frame::{command_name, DeviceStatus, Response};

const SCHEMA_BASE: &str = "https://schemas.3leaps.dev/uartprims/cli/v1";

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn schema_id(name: &str) -> String {
    format!("{SCHEMA_BASE}/{name}.schema.json")
}

#[derive(Serialize)]
struct ResponseOutput<'a> {
    schema_id: String,
    port: &'a str,
    command: u8,
    command_name: &'static str,
    status: u8,
    status_name: &'static str,
    data_size: usize,
    data_hex: String,
    data_text: Option<String>,
    wire_len: usize,
}

/// Print a reply to an arbitrary command.
pub fn print_response(port: &str, cmd: u8, response: &Response, format: OutputFormat) {
    let status = DeviceStatus::from_code(response.status);
    match format {
        OutputFormat::Json => {
            let out = ResponseOutput {
                schema_id: schema_id("response"),
                port,
                command: cmd,
                command_name: command_name(cmd),
                status: response.status,
                status_name: status.name(),
                data_size: response.data.len(),
                data_hex: hex::encode(&response.data),
                data_text: text_preview(&response.data),
                wire_len: response.wire_len(),
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["COMMAND", "STATUS", "SIZE", "DATA"])
                .add_row(vec![
                    format!("{} (0x{cmd:02X})", command_name(cmd)),
                    status.to_string(),
                    response.data.len().to_string(),
                    data_preview(&response.data),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "command={} (0x{cmd:02X}) status={} size={} data={}",
                command_name(cmd),
                status,
                response.data.len(),
                data_preview(&response.data)
            );
        }
        OutputFormat::Raw => print_raw(&response.data),
    }
}

/// Print a list of key/value rows, the shape shared by the typed commands.
pub fn print_fields<T: Serialize>(out: &T, rows: &[(&str, String)], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (key, value) in rows {
                table.add_row(vec![key.to_string(), value.clone()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let line: Vec<String> = rows.iter().map(|(k, v)| format!("{k}={v}")).collect();
            println!("{}", line.join(" "));
        }
        OutputFormat::Raw => {
            for (_, value) in rows {
                println!("{value}");
            }
        }
    }
}

pub fn print_json<T: Serialize>(out: &T) {
    println!(
        "{}",
        serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Printable ASCII form of reply data, if it has one.
pub fn text_preview(data: &[u8]) -> Option<String> {
    match std::str::from_utf8(data) {
        Ok(text) if !text.is_empty() && text.chars().all(|c| !c.is_control()) => {
            Some(text.to_string())
        }
        _ => None,
    }
}

pub fn data_preview(data: &[u8]) -> String {
    if data.is_empty() {
        return "<empty>".to_string();
    }
    match text_preview(data) {
        Some(text) => format!("{text:?}"),
        None => hex::encode(data),
    }
}

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use uartprims_transport::{discover_ports, looks_like_device, select_device, PortInfo};

use crate::cmd::PortsArgs;
use crate::exit::{channel_error, CliResult, SUCCESS};
use crate::output::{print_json, schema_id, OutputFormat};

#[derive(Debug, Serialize)]
struct PortEntry {
    name: String,
    likely_device: bool,
    selected: bool,
    vid: Option<String>,
    pid: Option<String>,
    manufacturer: Option<String>,
    product: Option<String>,
    serial_number: Option<String>,
}

#[derive(Debug, Serialize)]
struct PortsOutput {
    schema_id: String,
    ports: Vec<PortEntry>,
}

pub fn run(args: PortsArgs, format: OutputFormat) -> CliResult<i32> {
    let ports = discover_ports().map_err(|err| channel_error("port enumeration failed", err))?;
    let output = PortsOutput {
        schema_id: schema_id("ports"),
        ports: entries(&ports, args.all),
    };
    print_ports(&output, format);
    Ok(SUCCESS)
}

fn entries(ports: &[PortInfo], all: bool) -> Vec<PortEntry> {
    let selected = select_device(ports).map(|p| p.name.as_str());
    ports
        .iter()
        .filter(|p| all || looks_like_device(&p.name))
        .map(|p| PortEntry {
            name: p.name.clone(),
            likely_device: looks_like_device(&p.name),
            selected: selected == Some(p.name.as_str()),
            vid: p.usb.as_ref().map(|u| format!("{:04x}", u.vid)),
            pid: p.usb.as_ref().map(|u| format!("{:04x}", u.pid)),
            manufacturer: p.usb.as_ref().and_then(|u| u.manufacturer.clone()),
            product: p.usb.as_ref().and_then(|u| u.product.clone()),
            serial_number: p.usb.as_ref().and_then(|u| u.serial_number.clone()),
        })
        .collect()
}

fn print_ports(output: &PortsOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "USB ID", "PRODUCT", "DEFAULT"]);
            for p in &output.ports {
                table.add_row(vec![
                    p.name.clone(),
                    usb_id(p),
                    p.product.clone().unwrap_or_default(),
                    if p.selected { "*" } else { "" }.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            if output.ports.is_empty() {
                println!("no device ports found");
            }
            for p in &output.ports {
                let marker = if p.selected { " (default)" } else { "" };
                println!("{} {}{}", p.name, usb_id(p), marker);
            }
        }
        OutputFormat::Raw => {
            for p in &output.ports {
                println!("{}", p.name);
            }
        }
    }
}

fn usb_id(entry: &PortEntry) -> String {
    match (&entry.vid, &entry.pid) {
        (Some(vid), Some(pid)) => format!("{vid}:{pid}"),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use uartprims_transport::UsbInfo;

    use super::*;

    fn sample() -> Vec<PortInfo> {
        vec![
            PortInfo::new("/dev/ttyS0"),
            PortInfo {
                name: "/dev/ttyACM0".to_string(),
                usb: Some(UsbInfo {
                    vid: 0x2e8a,
                    pid: 0x000a,
                    serial_number: Some("E6614C31".to_string()),
                    manufacturer: None,
                    product: Some("Pico".to_string()),
                }),
            },
        ]
    }

    #[test]
    fn filters_non_device_ports_by_default() {
        let list = entries(&sample(), false);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "/dev/ttyACM0");
        assert!(list[0].selected);
        assert_eq!(usb_id(&list[0]), "2e8a:000a");
    }

    #[test]
    fn all_flag_keeps_every_port() {
        let list = entries(&sample(), true);
        assert_eq!(list.len(), 2);
        assert!(!list[0].likely_device);
        assert_eq!(usb_id(&list[0]), "-");
    }
}

use serde::Serialize;
use uartprims_session::CommandError;

use crate::cmd::link::{open_link, DeviceSession};
use crate::cmd::SelftestArgs;
use crate::exit::{CliResult, SELFTEST_FAILED, SUCCESS};
use crate::output::{data_preview, print_json, schema_id, OutputFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: &'static str,
    status: CheckStatus,
    detail: String,
}

impl CheckResult {
    fn from_outcome(name: &'static str, outcome: Result<String, CommandError>) -> Self {
        match outcome {
            Ok(detail) => Self {
                name,
                status: CheckStatus::Pass,
                detail,
            },
            Err(err) => Self {
                name,
                status: CheckStatus::Fail,
                detail: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct SelftestOutput {
    schema_id: String,
    port: String,
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(args: SelftestArgs, format: OutputFormat) -> CliResult<i32> {
    let mut link = open_link(&args.link)?;
    let checks = run_checks(&mut link.session);

    let has_fail = checks.iter().any(|c| c.status == CheckStatus::Fail);
    let output = SelftestOutput {
        schema_id: schema_id("selftest-report"),
        port: link.port,
        checks,
        overall: if has_fail { "fail" } else { "pass" },
    };

    print_selftest(&output, format);

    if has_fail {
        Ok(SELFTEST_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

/// Each check runs regardless of earlier failures.
fn run_checks(session: &mut DeviceSession) -> Vec<CheckResult> {
    vec![
        CheckResult::from_outcome("ping", session.ping().map(|reply| data_preview(&reply))),
        CheckResult::from_outcome(
            "get_version",
            session.get_version().map(|v| v.to_string()),
        ),
        CheckResult::from_outcome("get_status", session.get_status().map(|s| s.to_string())),
    ]
}

fn print_selftest(output: &SelftestOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("uartprims selftest ({})\n", output.port);
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<12} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
        OutputFormat::Raw => {
            println!("{}", output.overall);
        }
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
    }
}

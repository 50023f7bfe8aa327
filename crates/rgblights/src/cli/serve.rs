//! `serve` subcommand — one controller for the life of the process.
//!
//! Reads one request per line from stdin and answers with one line on
//! stdout (or one JSON object per line with `--json`). Stops at EOF.
//!
//! ```text
//! set battery 0xFF0000FF
//! set notifications red --flash timed --on-ms 500 --off-ms 500
//! lights
//! state
//! ```

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use serde::Serialize;

use rgblights_lib::sysfs::LedSysfs;

use super::{
    GlobalOpts, HwLight, LightController, LightType, Lights, Result, SetArgs, StoredStates,
    open_controller, set::describe_state,
};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct Request {
    #[command(subcommand)]
    command: RequestCommand,
}

#[derive(Subcommand, Debug)]
enum RequestCommand {
    /// List supported lights
    Lights,
    /// Set the state of one light
    Set(SetArgs),
    /// Show stored states and the active light
    State,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Response {
    Ok,
    Lights { lights: Vec<HwLight> },
    State { active: LightType, states: StoredStates },
    Error { message: String },
}

impl Response {
    fn to_line(&self) -> String {
        match self {
            Response::Ok => "ok".into(),
            Response::Lights { lights } => {
                let names: Vec<String> = lights
                    .iter()
                    .map(|l| format!("{}={}", l.light_type, l.id))
                    .collect();
                format!("lights {}", names.join(" "))
            }
            Response::State { active, states } => format!(
                "active={active} battery=[{}] notification=[{}]",
                describe_state(&states.battery),
                describe_state(&states.notification)
            ),
            Response::Error { message } => format!("error: {message}"),
        }
    }
}

/// Parse and execute one request line. `None` for blank lines and comments.
fn handle_line<S: LedSysfs>(controller: &LightController<S>, line: &str) -> Option<Response> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let request = match Request::try_parse_from(line.split_whitespace()) {
        Ok(r) => r,
        Err(e) => {
            let rendered = e.to_string();
            let first = rendered.lines().next().unwrap_or("invalid request");
            let message = first.strip_prefix("error: ").unwrap_or(first).to_string();
            return Some(Response::Error { message });
        }
    };

    Some(match request.command {
        RequestCommand::Lights => Response::Lights {
            lights: controller.get_lights(),
        },
        RequestCommand::Set(args) => match controller.set_light_state(args.light, &args.state()) {
            Ok(()) => Response::Ok,
            Err(e) => Response::Error {
                message: e.to_string(),
            },
        },
        RequestCommand::State => {
            let states = controller.states();
            Response::State {
                active: states.active(),
                states,
            }
        }
    })
}

fn serve<S: LedSysfs>(
    controller: &LightController<S>,
    mut input: impl BufRead,
    mut output: impl Write,
    json: bool,
) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Invalid UTF-8 becomes U+FFFD and is rejected by the request parser.
        let line = String::from_utf8_lossy(&buf);
        let Some(response) = handle_line(controller, &line) else {
            continue;
        };
        if json {
            let s = serde_json::to_string(&response).map_err(io::Error::other)?;
            writeln!(output, "{s}")?;
        } else {
            writeln!(output, "{}", response.to_line())?;
        }
        output.flush()?;
    }
    Ok(())
}

pub(super) fn cmd_serve(opts: &GlobalOpts) -> Result<()> {
    let controller = open_controller(opts)?;
    log::info!("serving light requests on stdin");
    let stdin = io::stdin();
    serve(&controller, stdin.lock(), io::stdout(), opts.json)
}

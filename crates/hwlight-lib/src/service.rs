//! Request boundary: newline-delimited JSON requests against a [`Lights`] instance.
//!
//! One request per line, one response per line. Blank lines are skipped and
//! a malformed line gets an `error` response without ending the session.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::arbiter::Lights;
use crate::device::LedOutputs;
use crate::error::{HwLightError, Result};
use crate::types::{HwLight, LightState};

/// A client request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    SetLightState {
        id: i32,
        #[serde(default)]
        state: LightState,
    },
    GetLights,
}

/// The reply to one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Lights { lights: Vec<HwLight> },
    UnsupportedOperation { id: i32 },
    Error { message: String },
}

/// Parse one request line.
pub fn parse_request(line: &str) -> Result<Request> {
    serde_json::from_str(line).map_err(|e| HwLightError::Request(e.to_string()))
}

/// Execute a request and map the outcome to a response.
pub fn handle<O: LedOutputs>(lights: &Lights<O>, request: Request) -> Response {
    match request {
        Request::SetLightState { id, state } => match lights.set_light_state(id, state) {
            Ok(()) => Response::Ok,
            Err(HwLightError::UnsupportedOperation(id)) => Response::UnsupportedOperation { id },
            Err(e) => {
                log::warn!("set_light_state({id}) failed: {e}");
                Response::Error {
                    message: e.to_string(),
                }
            }
        },
        Request::GetLights => Response::Lights {
            lights: lights.get_lights(),
        },
    }
}

/// Parse and execute one line. Returns `None` for blank lines.
pub fn handle_line<O: LedOutputs>(lights: &Lights<O>, line: &str) -> Option<Response> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(match parse_request(line) {
        Ok(request) => handle(lights, request),
        Err(e) => Response::Error {
            message: e.to_string(),
        },
    })
}

/// Serve requests from `input` until EOF, writing one response line per request.
///
/// A line that is not valid UTF-8 gets an `error` response like any other
/// malformed request. Only read and write failures end the session.
///
/// Returns the number of requests handled.
pub fn serve<O: LedOutputs>(
    lights: &Lights<O>,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<usize> {
    let mut handled = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let response = match std::str::from_utf8(&buf) {
            Ok(line) => match handle_line(lights, line) {
                Some(response) => response,
                None => continue,
            },
            Err(e) => Response::Error {
                message: format!("request is not valid UTF-8: {e}"),
            },
        };
        let json = serde_json::to_string(&response).map_err(|e| {
            HwLightError::Request(format!("response serialization failed: {e}"))
        })?;
        writeln!(output, "{json}")?;
        output.flush()?;
        handled += 1;
    }
    Ok(handled)
}

//! JSON in and out: stdout/file writers and node input reading.

use serde_json::{Map, Value};
use std::io::{Read, Write};
use std::path::Path;

use crate::CliError;

/// Writes `value` to `out`, pretty (multi-line) or compact, followed by a newline.
pub fn write_json<W: Write>(out: &mut W, value: &Value, pretty: bool) -> Result<(), CliError> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{}", s)?;
    out.flush()?;
    Ok(())
}

/// Reads a JSON object from `path`, or from stdin when `None`.
pub fn read_json_object(path: Option<&Path>) -> Result<Map<String, Value>, CliError> {
    let raw = match path {
        Some(p) => std::fs::read_to_string(p)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    match serde_json::from_str::<Value>(&raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(CliError::NotAnObject),
    }
}

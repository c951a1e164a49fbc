//! Command input handling.

use std::io::{self, Read};

use anyhow::{Context, Result};
use polykit::Value;

/// Marker argument meaning "read from stdin".
const STDIN_MARKER: &str = "-";

/// Returns the argument, or stdin when it is absent or `-`.
pub fn read_input(arg: Option<String>) -> Result<String> {
    read_input_from(arg, io::stdin().lock())
}

/// Like [`read_input`] with an explicit fallback reader.
pub fn read_input_from(arg: Option<String>, mut reader: impl Read) -> Result<String> {
    match arg {
        Some(text) if text != STDIN_MARKER => Ok(text),
        _ => {
            let mut text = String::new();
            reader
                .read_to_string(&mut text)
                .context("Failed to read from stdin")?;
            Ok(text)
        }
    }
}

/// Parses a command-line value as JSON, falling back to a plain string.
pub fn parse_value(arg: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(arg)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(arg))
}

pub fn parse_values(args: &[String]) -> Vec<Value> {
    args.iter().map(|arg| parse_value(arg)).collect()
}

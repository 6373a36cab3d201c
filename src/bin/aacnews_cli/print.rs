#![deny(clippy::all, clippy::pedantic)]

use serde::Serialize;
use serde_json::Value;

use crate::client::CliError;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))?;
    println!("{out}");
    Ok(())
}

/// Text bodies (HTML templates, plain messages) are printed as-is.
pub fn print_body(value: &Value) -> Result<(), CliError> {
    match value {
        Value::String(text) => {
            println!("{text}");
            Ok(())
        }
        Value::Null => Ok(()),
        other => print_json(other),
    }
}

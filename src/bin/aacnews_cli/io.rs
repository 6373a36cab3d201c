#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::{Path, PathBuf};

use aacnews_admin::api_types::{ColumnGroup, ID_FIELD, Payload};
use serde_json::Value;
use time::Date;
use time::macros::format_description;

use crate::client::CliError;

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::InputFile {
        path: path.display().to_string(),
        source,
    })
}

pub fn read_value(val: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    if let Some(path) = file {
        read_file(&path)
    } else if let Some(v) = val {
        Ok(v)
    } else {
        Err(CliError::InvalidInput("value required".into()))
    }
}

pub fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, CliError> {
    if let Some(path) = file {
        return read_file(&path).map(Some);
    }
    Ok(val)
}

/// Base payload from a JSON object file, or an empty one.
pub fn read_payload(file: Option<PathBuf>) -> Result<Payload, CliError> {
    let Some(path) = file else {
        return Ok(Payload::new());
    };
    let raw = read_file(&path)?;
    match serde_json::from_str(&raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CliError::InvalidInput(format!(
            "{} must contain a JSON object",
            path.display()
        ))),
        Err(e) => Err(CliError::InvalidInput(format!("{}: {e}", path.display()))),
    }
}

pub fn read_groups(path: &Path) -> Result<Vec<ColumnGroup>, CliError> {
    let raw = read_file(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| CliError::InvalidInput(format!("{}: {e}", path.display())))
}

/// Numeric identifiers travel as JSON numbers, anything else as a string.
pub fn id_value(id: &str) -> Value {
    id.parse::<u64>()
        .map_or_else(|_| Value::String(id.to_owned()), Value::from)
}

pub fn set_id(payload: &mut Payload, id: Option<String>) {
    if let Some(id) = id {
        payload.insert(ID_FIELD.to_owned(), id_value(&id));
    }
}

pub fn set_field(payload: &mut Payload, key: &str, value: Option<impl Into<Value>>) {
    if let Some(value) = value {
        payload.insert(key.to_owned(), value.into());
    }
}

pub fn parse_date_opt(val: Option<String>) -> Result<Option<String>, CliError> {
    if let Some(v) = val {
        Date::parse(&v, format_description!("[year]-[month]-[day]"))
            .map_err(|e| CliError::InvalidInput(format!("date `{v}`: {e}")))?;
        Ok(Some(v))
    } else {
        Ok(None)
    }
}

//! The `get` command

use crate::cli::ValueKind;
use crate::error::{CliError, Result};
use propdb_core::PropertyDatabase;
use propdb_core::scalar::float_to_string;
use serde_json::{Map, Number, Value, json};

/// Run the get command
pub fn run_get(
    db: &PropertyDatabase,
    key: &str,
    kind: ValueKind,
    default: Option<&str>,
    json: bool,
) -> Result<()> {
    println!("{}", render_get(db, key, kind, default, json)?);
    Ok(())
}

/// Resolve `key` as `kind` and format it for output.
pub fn render_get(
    db: &PropertyDatabase,
    key: &str,
    kind: ValueKind,
    default: Option<&str>,
    json: bool,
) -> Result<String> {
    let value = resolve(db, key, kind, default)?;
    if json {
        let context = db.get(key)?;
        return Ok(serde_json::to_string_pretty(&json!({
            "key": context.key(),
            "value": value,
        }))?);
    }

    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Object(_) => serde_json::to_string_pretty(&value)?,
        other => other.to_string(),
    })
}

fn resolve(db: &PropertyDatabase, key: &str, kind: ValueKind, default: Option<&str>) -> Result<Value> {
    let context = db.get(key)?;
    tracing::debug!(key = context.key(), ?kind, set = context.is_set(), "Resolving property");

    Ok(match kind {
        ValueKind::String => Value::String(match default {
            Some(d) => context.as_string_or(d),
            None => context.as_string()?,
        }),
        ValueKind::Number => {
            let number = match default {
                Some(d) => context.as_number_or(parse_number_default(d)?),
                None => context.as_number()?,
            };
            number_value(number)
        }
        ValueKind::Boolean => Value::Bool(match default {
            Some(d) => context.as_boolean_or(parse_boolean_default(d)?),
            None => context.as_boolean()?,
        }),
        ValueKind::Object => Value::Object(match default {
            Some(d) => context.as_object_or(parse_object_default(d)?),
            None => context.as_object()?,
        }),
    })
}

fn number_value(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        return Value::from(number as i64);
    }
    Number::from_f64(number)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(float_to_string(number)))
}

fn parse_number_default(input: &str) -> Result<f64> {
    input
        .trim()
        .parse()
        .map_err(|_| CliError::user(format!("Default '{input}' is not a number")))
}

fn parse_boolean_default(input: &str) -> Result<bool> {
    match input.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CliError::user(format!(
            "Default '{input}' is not a boolean (expected true or false)"
        ))),
    }
}

fn parse_object_default(input: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(input)? {
        Value::Object(map) => Ok(map),
        _ => Err(CliError::user(format!("Default '{input}' is not a JSON object"))),
    }
}

// SPDX-License-Identifier: MIT

//! Input validation against a tool's declared schema fragment.
//!
//! Runs in the dispatcher before the tool does: coerces bare-string input,
//! fills declared defaults, and rejects missing required fields so that no
//! network call happens on bad input.

use crate::contract::error::LookupError;
use serde_json::{Map, Value};

/// Validate and coerce `input` against `schema`, returning the object the
/// tool will deserialize.
pub fn validate(schema: &Value, input: Value) -> Result<Value, LookupError> {
    let mut object = coerce(schema, input)?;
    apply_defaults(schema, &mut object);
    check_required(schema, &object)?;
    Ok(Value::Object(object))
}

/// Orchestrators routinely hand free text to single-argument tools. A bare
/// string is wrapped under the schema's sole string property, or dropped
/// when the schema declares no properties at all.
fn coerce(schema: &Value, input: Value) -> Result<Map<String, Value>, LookupError> {
    match input {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        Value::String(text) => {
            let properties = schema.get("properties").and_then(Value::as_object);
            match properties {
                None => Ok(Map::new()),
                Some(props) if props.is_empty() => Ok(Map::new()),
                Some(props) => match single_string_property(props) {
                    Some(key) => {
                        let mut map = Map::new();
                        map.insert(key.to_string(), Value::String(text));
                        Ok(map)
                    }
                    None => Err(LookupError::invalid_input(
                        "This tool takes structured input, not free text.",
                    )),
                },
            }
        }
        other => Err(LookupError::invalid_input(format!(
            "Unsupported input type: {other}"
        ))),
    }
}

fn single_string_property(props: &Map<String, Value>) -> Option<&str> {
    if props.len() != 1 {
        return None;
    }
    let (key, prop) = props.iter().next()?;
    match prop.get("type").and_then(Value::as_str) {
        Some("string") | None => Some(key),
        _ => None,
    }
}

fn apply_defaults(schema: &Value, object: &mut Map<String, Value>) {
    if let Some(props) = schema.get("properties").and_then(Value::as_object) {
        for (key, prop) in props {
            if let Some(default) = prop.get("default") {
                object
                    .entry(key.clone())
                    .or_insert_with(|| default.clone());
            }
        }
    }
}

fn check_required(schema: &Value, object: &Map<String, Value>) -> Result<(), LookupError> {
    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for field in required.iter().filter_map(Value::as_str) {
            if !object.contains_key(field) {
                return Err(LookupError::invalid_input(format!(
                    "Missing required field '{field}'."
                )));
            }
        }
    }
    Ok(())
}

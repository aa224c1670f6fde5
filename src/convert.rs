//! Conversion utilities between JSON and category records.
//!
//! Provides record loading from JSON text, readers and files, plus the
//! argument helpers used by tool dispatch.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::error::{DiagramError, Result};
use crate::record::CategoryRecord;

/// Convert a JSON value to category records.
///
/// Accepts either an array of records or an object with a `categories`
/// array, the shape the category store returns.
pub fn records_from_json(json: JsonValue) -> Result<Vec<CategoryRecord>> {
    let list = match json {
        JsonValue::Array(_) => json,
        JsonValue::Object(mut map) => map.remove("categories").ok_or_else(|| {
            DiagramError::InvalidArg {
                name: "categories".to_string(),
                reason: "Expected an array or an object with a 'categories' array".to_string(),
            }
        })?,
        other => {
            return Err(DiagramError::InvalidArg {
                name: "categories".to_string(),
                reason: format!("Expected an array, got {}", json_type(&other)),
            })
        }
    };
    serde_json::from_value(list).map_err(DiagramError::from)
}

/// Read category records from a JSON stream.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<CategoryRecord>> {
    let json: JsonValue = serde_json::from_reader(reader)?;
    records_from_json(json)
}

/// Read category records from a JSON file.
pub fn read_records_file(path: impl AsRef<Path>) -> Result<Vec<CategoryRecord>> {
    let file = File::open(path.as_ref())?;
    read_records(BufReader::new(file))
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Helper to get the required category list from JSON arguments.
pub fn get_records_arg(args: &Map<String, JsonValue>, name: &str) -> Result<Vec<CategoryRecord>> {
    let json = args
        .get(name)
        .cloned()
        .ok_or_else(|| DiagramError::MissingArg(name.to_string()))?;
    if !json.is_array() {
        return Err(DiagramError::InvalidArg {
            name: name.to_string(),
            reason: format!("Expected array of objects, got {}", json_type(&json)),
        });
    }
    serde_json::from_value(json).map_err(|e| DiagramError::InvalidArg {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Helper to get an optional string argument from JSON arguments.
///
/// `null` counts as absent; any other non-string is an error.
pub fn get_optional_string(args: &Map<String, JsonValue>, name: &str) -> Result<Option<String>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(DiagramError::InvalidArg {
            name: name.to_string(),
            reason: format!("Expected a string, got {}", json_type(other)),
        }),
    }
}

/// Helper to get an optional u64 argument from JSON arguments.
///
/// `null` counts as absent; any other non-integer is an error.
pub fn get_optional_u64(args: &Map<String, JsonValue>, name: &str) -> Result<Option<u64>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => v.as_u64().map(Some).ok_or_else(|| DiagramError::InvalidArg {
            name: name.to_string(),
            reason: "Expected a non-negative integer".to_string(),
        }),
    }
}

/// Helper to get an optional boolean argument.
///
/// Strings such as `"false"` are rejected rather than read as absent.
pub fn get_optional_bool(args: &Map<String, JsonValue>, name: &str) -> Result<Option<bool>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(DiagramError::InvalidArg {
            name: name.to_string(),
            reason: format!("Expected a boolean, got {}", json_type(other)),
        }),
    }
}

//! Reading and writing the text and JSON documents the merge tools work on.
//!
//! All write operations go through [`super::atomic::safe_write`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use tmplmerge::utils::fs::formats::{read_json_value, write_json_pretty};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let value = read_json_value(Path::new(".mcp.json"))?;
//! write_json_pretty(Path::new("out/.mcp.json"), &value)?;
//! # Ok(())
//! # }
//! ```

use crate::core::TmplmergeError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Reads a text file with proper error handling and context.
///
/// # Errors
/// Returns an error with context if the file cannot be read
pub fn read_text_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Writes a text file atomically, creating parent directories.
///
/// # Errors
/// Returns an error with context if the file cannot be written
pub fn write_text_file(path: &Path, content: &str) -> Result<()> {
    super::atomic::safe_write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Reads a JSON file into a [`Value`].
///
/// # Errors
/// Returns an error if the file cannot be read, or a
/// [`TmplmergeError::JsonParseError`] if it is not valid JSON
pub fn read_json_value(path: &Path) -> Result<Value> {
    let content = read_text_file(path)?;
    serde_json::from_str(&content).map_err(|e| {
        TmplmergeError::JsonParseError {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Reads a JSON file that must contain an object at the top level.
///
/// # Errors
/// As [`read_json_value`], plus [`TmplmergeError::InvalidDocument`] when the
/// top level is not an object
pub fn read_json_object(path: &Path) -> Result<Value> {
    let value = read_json_value(path)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(TmplmergeError::InvalidDocument {
            path: path.display().to_string(),
            reason: format!("expected a JSON object at the top level, found {}", json_kind(&value)),
        }
        .into())
    }
}

/// Serializes a value as pretty JSON (2-space indentation) with a trailing newline.
pub fn to_pretty_json(value: &Value) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Writes a value as pretty JSON with a trailing newline, atomically.
///
/// # Errors
/// Returns an error if serialization fails or the file cannot be written
pub fn write_json_pretty(path: &Path, value: &Value) -> Result<()> {
    let json = to_pretty_json(value)?;
    write_text_file(path, &json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))
}

/// Short human-readable name of a JSON value's type, for error messages.
#[must_use]
pub const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

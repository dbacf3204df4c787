//! Deep merging of JSON configuration documents.
//!
//! Configuration files are merged by folding an ordered list of overlay
//! documents onto an accumulator. This module holds the generic rules used for
//! settings documents, plus the loading and bookkeeping shared with the MCP
//! server-list merge in [`crate::mcp`].
//!
//! # Merge rules
//!
//! For every key of an overlay object:
//! - keys starting with `_` are annotations and are skipped
//! - a key missing from the accumulator is copied
//! - two objects are merged recursively
//! - two arrays are concatenated, skipping overlay elements already present
//! - anything else is replaced by the overlay value
//!
//! All functions take their inputs by reference and return new values, so a
//! base document can be reused across several folds.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tmplmerge::merge::deep_merge;
//!
//! let base = json!({"permissions": {"allow": ["Read"]}, "model": "sonnet"});
//! let overlay = json!({"permissions": {"allow": ["Read", "Edit"]}, "model": "opus", "_note": "x"});
//!
//! assert_eq!(
//!     deep_merge(&base, &overlay),
//!     json!({"permissions": {"allow": ["Read", "Edit"]}, "model": "opus"})
//! );
//! ```

use crate::utils::fs::read_json_object;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::mcp::ServerCollision;

/// Which merge strategy to apply to a set of config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigKind {
    /// MCP server lists (`.mcp.json`): servers merged by name, last writer wins.
    Mcp,
    /// Generic settings documents: recursive deep merge.
    Settings,
}

impl std::fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mcp => write!(f, "mcp"),
            Self::Settings => write!(f, "settings"),
        }
    }
}

/// Result of merging config files from disk.
#[derive(Debug, Clone)]
pub struct ConfigMerge {
    /// The merged document.
    pub config: Value,
    /// Number of overlay files that existed and were applied.
    pub applied: usize,
    /// Overlay files that did not exist and were skipped.
    pub skipped: Vec<PathBuf>,
    /// MCP servers defined more than once (always empty for settings).
    pub collisions: Vec<ServerCollision>,
}

/// Overlay documents read from disk, in the order they were given.
#[derive(Debug, Default)]
pub struct LoadedOverlays {
    /// Documents that existed, paired with their path.
    pub documents: Vec<(PathBuf, Value)>,
    /// Paths that did not exist.
    pub missing: Vec<PathBuf>,
}

/// Recursively merges `overlay` into a copy of `base`.
///
/// If either side is not an object the overlay wins outright.
#[must_use]
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let (Value::Object(base_map), Value::Object(overlay_map)) = (base, overlay) else {
        return overlay.clone();
    };

    let mut result = base_map.clone();
    for (key, value) in overlay_map {
        if key.starts_with('_') {
            continue;
        }

        let merged = match (result.get(key), value) {
            (Some(existing @ Value::Object(_)), Value::Object(_)) => deep_merge(existing, value),
            (Some(Value::Array(existing)), Value::Array(items)) => {
                Value::Array(merge_arrays(existing, items))
            }
            _ => value.clone(),
        };
        result.insert(key.clone(), merged);
    }

    Value::Object(result)
}

/// Concatenates two arrays, dropping overlay elements already in the combination.
///
/// Duplicates inside `base` are kept as they are.
fn merge_arrays(base: &[Value], overlay: &[Value]) -> Vec<Value> {
    let mut combined = base.to_vec();
    for item in overlay {
        if !combined.contains(item) {
            combined.push(item.clone());
        }
    }
    combined
}

/// Folds overlays onto an optional base document.
///
/// The base seeds the accumulator as-is, annotation keys included; an empty
/// object is used when there is no base.
#[must_use]
pub fn merge_settings<'a, I>(base: Option<Value>, overlays: I) -> Value
where
    I: IntoIterator<Item = &'a Value>,
{
    let seed = base.unwrap_or_else(|| Value::Object(Map::new()));
    overlays.into_iter().fold(seed, |acc, overlay| deep_merge(&acc, overlay))
}

/// Reads the optional base document.
///
/// A missing path (or no path at all) is `None`. A file that exists but is not a
/// JSON object is an error.
pub fn load_optional_base(path: Option<&Path>) -> Result<Option<Value>> {
    match path {
        Some(path) if path.exists() => {
            let value = read_json_object(path)
                .with_context(|| format!("Failed to load base config: {}", path.display()))?;
            Ok(Some(value))
        }
        Some(path) => {
            tracing::debug!("Base config {} does not exist, starting empty", path.display());
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Reads overlay files in order, skipping ones that don't exist.
///
/// Every file is read before anything is merged, so one malformed overlay fails
/// the whole operation.
pub fn load_overlays(files: &[PathBuf]) -> Result<LoadedOverlays> {
    let mut loaded = LoadedOverlays::default();
    for file in files {
        if !file.exists() {
            tracing::debug!("Skipping missing overlay: {}", file.display());
            loaded.missing.push(file.clone());
            continue;
        }
        let value = read_json_object(file)
            .with_context(|| format!("Failed to load overlay: {}", file.display()))?;
        loaded.documents.push((file.clone(), value));
    }
    Ok(loaded)
}

/// Merges settings files from disk.
pub fn merge_settings_files(files: &[PathBuf], base: Option<&Path>) -> Result<ConfigMerge> {
    let base = load_optional_base(base)?;
    let overlays = load_overlays(files)?;

    let config = merge_settings(base, overlays.documents.iter().map(|(_, value)| value));

    Ok(ConfigMerge {
        config,
        applied: overlays.documents.len(),
        skipped: overlays.missing,
        collisions: Vec::new(),
    })
}

/// Merges config files from disk with the strategy for `kind`.
pub fn merge_config_files(
    kind: ConfigKind,
    files: &[PathBuf],
    base: Option<&Path>,
) -> Result<ConfigMerge> {
    match kind {
        ConfigKind::Mcp => crate::mcp::merge_mcp_files(files, base),
        ConfigKind::Settings => merge_settings_files(files, base),
    }
}

//! Component catalog merging.
//!
//! A catalog (`external-catalog.json`) lists installable components grouped
//! under a `components` object:
//!
//! ```json
//! {
//!   "components": {
//!     "agents": [{"name": "reviewer", "source": "..."}],
//!     "skills": [],
//!     "plugins": [],
//!     "mcp-servers": []
//!   }
//! }
//! ```
//!
//! Merging pulls a donor catalog into a target catalog. The target keeps its
//! own agents and gains every donor agent it does not already list by name.
//! Skills and plugins are taken wholesale from the donor. Everything else in
//! the target, MCP servers included, is left as it was.

use crate::core::TmplmergeError;
use crate::utils::fs::{read_json_object, write_json_pretty};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

const COMPONENTS_KEY: &str = "components";
const AGENTS_KEY: &str = "agents";
/// Component lists replaced wholesale by the donor's.
const REPLACED_KEYS: &[&str] = &["skills", "plugins"];

/// Outcome of a catalog merge.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMergeResult {
    /// The merged catalog.
    pub catalog: Value,
    /// Number of donor agents appended to the target.
    pub agents_added: usize,
}

/// Merges `donor` into `target`.
///
/// # Errors
///
/// Returns [`TmplmergeError::InvalidDocument`] if either catalog lacks a
/// `components` object, or if a component list is not an array.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tmplmerge::catalog::merge_catalog;
///
/// let target = json!({"components": {"agents": [{"name": "a"}], "mcp-servers": ["x"]}});
/// let donor = json!({"components": {"agents": [{"name": "a"}, {"name": "b"}], "skills": ["s"]}});
///
/// let result = merge_catalog(&target, &donor).unwrap();
/// assert_eq!(result.agents_added, 1);
/// assert_eq!(
///     result.catalog,
///     json!({"components": {
///         "agents": [{"name": "a"}, {"name": "b"}],
///         "mcp-servers": ["x"],
///         "skills": ["s"],
///         "plugins": []
///     }})
/// );
/// ```
pub fn merge_catalog(target: &Value, donor: &Value) -> Result<CatalogMergeResult, TmplmergeError> {
    let donor_components = components(donor, "donor")?;
    let mut catalog = target.clone();
    let target_components = components_mut(&mut catalog, "target")?;

    let donor_agents = component_list(donor_components, AGENTS_KEY, "donor")?;
    let agents = target_components
        .entry(AGENTS_KEY)
        .or_insert_with(|| Value::Array(Vec::new()));
    let Value::Array(agents) = agents else {
        return Err(not_an_array("target", AGENTS_KEY));
    };

    let mut agents_added = 0;
    for agent in donor_agents {
        if contains_agent(agents, agent) {
            tracing::debug!("Skipping agent already in target catalog: {}", agent_label(agent));
        } else {
            agents.push(agent.clone());
            agents_added += 1;
        }
    }

    for key in REPLACED_KEYS {
        let replacement = component_list(donor_components, key, "donor")?.to_vec();
        target_components.insert((*key).to_string(), Value::Array(replacement));
    }

    Ok(CatalogMergeResult {
        catalog,
        agents_added,
    })
}

/// Merges the donor catalog file into the target file, rewriting the target.
///
/// # Errors
///
/// Returns an error if either file is missing or malformed, or the target
/// cannot be written. The target is not modified on error.
pub fn merge_catalog_files(target_path: &Path, donor_path: &Path) -> Result<CatalogMergeResult> {
    for path in [target_path, donor_path] {
        if !path.is_file() {
            return Err(TmplmergeError::InputNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
    }

    let target = read_json_object(target_path)?;
    let donor = read_json_object(donor_path)?;

    let result = merge_catalog(&target, &donor).map_err(|e| relabel(e, target_path, donor_path))?;

    write_json_pretty(target_path, &result.catalog)
        .with_context(|| format!("Failed to write catalog: {}", target_path.display()))?;
    Ok(result)
}

/// An agent is already present if one with the same name exists, or for
/// nameless agents, an identical entry.
fn contains_agent(agents: &[Value], agent: &Value) -> bool {
    match agent.get("name") {
        Some(name) => agents.iter().any(|a| a.get("name") == Some(name)),
        None => agents.contains(agent),
    }
}

fn agent_label(agent: &Value) -> String {
    agent
        .get("name")
        .and_then(Value::as_str)
        .map_or_else(|| agent.to_string(), ToString::to_string)
}

fn components<'a>(catalog: &'a Value, label: &str) -> Result<&'a Map<String, Value>, TmplmergeError> {
    catalog
        .get(COMPONENTS_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| missing_components(label))
}

fn components_mut<'a>(
    catalog: &'a mut Value,
    label: &str,
) -> Result<&'a mut Map<String, Value>, TmplmergeError> {
    catalog
        .get_mut(COMPONENTS_KEY)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| missing_components(label))
}

/// A missing list is treated as empty.
fn component_list<'a>(
    components: &'a Map<String, Value>,
    key: &str,
    label: &str,
) -> Result<&'a [Value], TmplmergeError> {
    match components.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(not_an_array(label, key)),
    }
}

fn missing_components(label: &str) -> TmplmergeError {
    TmplmergeError::InvalidDocument {
        path: label.to_string(),
        reason: format!("catalog has no '{COMPONENTS_KEY}' object"),
    }
}

fn not_an_array(label: &str, key: &str) -> TmplmergeError {
    TmplmergeError::InvalidDocument {
        path: label.to_string(),
        reason: format!("'{COMPONENTS_KEY}.{key}' must be an array"),
    }
}

/// Swaps the "target"/"donor" labels for the real file paths.
fn relabel(error: TmplmergeError, target_path: &Path, donor_path: &Path) -> TmplmergeError {
    match error {
        TmplmergeError::InvalidDocument { path, reason } => {
            let path = if path == "target" { target_path } else { donor_path };
            TmplmergeError::InvalidDocument {
                path: path.display().to_string(),
                reason,
            }
        }
        other => other,
    }
}

//! MCP (Model Context Protocol) server list merging.
//!
//! MCP configs (`.mcp.json`) have the shape
//!
//! ```json
//! {
//!   "mcpServers": { "github": { "command": "npx", "args": ["..."] } },
//!   "_comment": "Required env vars: GITHUB_TOKEN"
//! }
//! ```
//!
//! Unlike settings documents, server definitions are never deep-merged: each
//! server is taken whole from the last document that defines it. A server
//! defined again by a later overlay is reported as a [`ServerCollision`] so the
//! caller can warn about it. The `_comment` annotations of all inputs are
//! combined into a single sorted list of required environment variables.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tmplmerge::mcp::merge_mcp;
//!
//! # fn main() -> anyhow::Result<()> {
//! let web = json!({"mcpServers": {"playwright": {"command": "npx"}}, "_comment": "Required env vars: none"});
//! let gh = json!({"mcpServers": {"github": {"command": "gh-mcp"}}, "_comment": "Required env vars: GITHUB_TOKEN."});
//!
//! let merged = merge_mcp(None, &[("web.json".to_string(), web), ("gh.json".to_string(), gh)])?;
//! assert!(merged.collisions.is_empty());
//! assert_eq!(merged.config["_comment"], "Required env vars: GITHUB_TOKEN");
//! # Ok(())
//! # }
//! ```

mod env_vars;


pub use env_vars::{env_vars_comment, parse_required_env_vars};

use crate::core::TmplmergeError;
use crate::merge::{ConfigMerge, load_optional_base, load_overlays};
use anyhow::Result;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Key holding the server map in an MCP config.
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// Key holding the free-text annotation.
pub const COMMENT_KEY: &str = "_comment";

/// A server name defined by more than one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCollision {
    /// The server name.
    pub server: String,
    /// The overlay whose definition won.
    pub source: String,
}

impl fmt::Display for ServerCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MCP server '{}' defined in multiple configs. Using definition from {}.",
            self.server, self.source
        )
    }
}

/// Result of an MCP merge.
#[derive(Debug, Clone, PartialEq)]
pub struct McpMerge {
    /// The merged config: `mcpServers` and, when any variables are required,
    /// `_comment`.
    pub config: Value,
    /// Servers that were overwritten by a later overlay, in the order seen.
    pub collisions: Vec<ServerCollision>,
}

/// Merges MCP configs: the base's servers first, then each overlay's in order.
///
/// `overlays` pairs each document with a label (usually its path) used in
/// collision reports. Overlays without `mcpServers` only contribute their
/// `_comment`.
///
/// # Errors
///
/// Returns [`TmplmergeError::InvalidDocument`] if any `mcpServers` value is not
/// an object.
pub fn merge_mcp(base: Option<&Value>, overlays: &[(String, Value)]) -> Result<McpMerge> {
    let mut servers = Map::new();
    let mut env_vars = BTreeSet::new();
    let mut collisions = Vec::new();

    if let Some(base) = base {
        if let Some(base_servers) = server_map(base, "base config")? {
            servers = base_servers.clone();
        }
        collect_env_vars(base, &mut env_vars);
    }

    for (label, overlay) in overlays {
        collect_env_vars(overlay, &mut env_vars);

        let Some(overlay_servers) = server_map(overlay, label)? else {
            continue;
        };
        for (name, config) in overlay_servers {
            if servers.contains_key(name) {
                collisions.push(ServerCollision {
                    server: name.clone(),
                    source: label.clone(),
                });
            }
            servers.insert(name.clone(), config.clone());
        }
    }

    let mut config = Map::new();
    config.insert(MCP_SERVERS_KEY.to_string(), Value::Object(servers));
    if let Some(comment) = env_vars_comment(&env_vars) {
        config.insert(COMMENT_KEY.to_string(), Value::String(comment));
    }

    Ok(McpMerge {
        config: Value::Object(config),
        collisions,
    })
}

/// Merges MCP config files from disk.
///
/// Missing base and overlay paths are skipped; an existing file that is not a
/// JSON object fails the merge before anything is written.
pub fn merge_mcp_files(files: &[PathBuf], base: Option<&Path>) -> Result<ConfigMerge> {
    let base = load_optional_base(base)?;
    let loaded = load_overlays(files)?;

    let applied = loaded.documents.len();
    let overlays: Vec<(String, Value)> = loaded
        .documents
        .into_iter()
        .map(|(path, value)| (path.display().to_string(), value))
        .collect();

    let merged = merge_mcp(base.as_ref(), &overlays)?;

    Ok(ConfigMerge {
        config: merged.config,
        applied,
        skipped: loaded.missing,
        collisions: merged.collisions,
    })
}

fn server_map<'a>(document: &'a Value, label: &str) -> Result<Option<&'a Map<String, Value>>> {
    match document.get(MCP_SERVERS_KEY) {
        None => Ok(None),
        Some(Value::Object(servers)) => Ok(Some(servers)),
        Some(other) => Err(TmplmergeError::InvalidDocument {
            path: label.to_string(),
            reason: format!(
                "'{MCP_SERVERS_KEY}' must be an object, found {}",
                crate::utils::fs::formats::json_kind(other)
            ),
        }
        .into()),
    }
}

fn collect_env_vars(document: &Value, vars: &mut BTreeSet<String>) {
    match document.get(COMMENT_KEY) {
        Some(Value::String(comment)) => vars.extend(parse_required_env_vars(comment)),
        Some(other) => {
            tracing::debug!("Ignoring non-string {COMMENT_KEY}: {other}");
        }
        None => {}
    }
}

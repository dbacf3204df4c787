//! Test fixtures for creating sample documents
//!
//! This module provides builders for the inputs the merge tools consume:
//! guideline markdown documents and the JSON configs, state files and
//! catalogs that sit next to them.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

/// Test fixture for guideline markdown documents
#[derive(Clone, Debug)]
pub struct MarkdownFixture {
    pub content: String,
    pub name: String,
}

impl MarkdownFixture {
    /// Base template with a title and two managed sections
    pub fn base_template() -> Self {
        Self {
            name: "base.md".to_string(),
            content: "\
# Project Guidelines

## Quality Standards
Run the linter before committing.

## Security
Never commit secrets.
"
            .to_string(),
        }
    }

    /// Project document with a stale managed section and two custom ones
    pub fn existing_with_custom() -> Self {
        Self {
            name: "CLAUDE.md".to_string(),
            content: "\
# Project Guidelines

## Security
Old security advice.

## Deployment
Run `make ship`.

## Team Contacts
Ask in the ops room.
"
            .to_string(),
        }
    }

    /// Write this fixture to a directory
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}

/// Test fixture for JSON documents
#[derive(Clone, Debug)]
pub struct JsonFixture {
    pub value: Value,
    pub name: String,
}

impl JsonFixture {
    /// MCP config defining one `npx`-launched server per name
    pub fn mcp(name: &str, servers: &[&str], comment: Option<&str>) -> Self {
        let servers: serde_json::Map<String, Value> = servers
            .iter()
            .map(|server| {
                (
                    (*server).to_string(),
                    json!({"command": "npx", "args": [format!("{server}-mcp"), format!("--from={name}")]}),
                )
            })
            .collect();

        let mut value = json!({ "mcpServers": servers });
        if let Some(comment) = comment {
            value["_comment"] = Value::String(comment.to_string());
        }
        Self {
            name: name.to_string(),
            value,
        }
    }

    /// Settings document with an allow list
    pub fn settings(name: &str, allow: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            value: json!({"permissions": {"allow": allow}}),
        }
    }

    /// State file written before `schema_version` existed
    pub fn legacy_state() -> Self {
        Self {
            name: ".activated-overlays.json".to_string(),
            value: json!({"overlays": ["web-dev"]}),
        }
    }

    /// Catalog listing the given agents, skills and MCP servers
    pub fn catalog(name: &str, agents: &[&str], skills: &[&str], mcp_servers: &[&str]) -> Self {
        let named = |names: &[&str]| -> Vec<Value> {
            names.iter().map(|n| json!({"name": n})).collect()
        };
        Self {
            name: name.to_string(),
            value: json!({
                "components": {
                    "agents": named(agents),
                    "skills": named(skills),
                    "plugins": [],
                    "mcp-servers": named(mcp_servers)
                }
            }),
        }
    }

    /// Arbitrary value
    pub fn raw(name: &str, value: Value) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }

    /// Write this fixture to a directory as pretty JSON
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.value)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}

//! Schema migration for the template activation state file.
//!
//! The state file (`.activated-overlays.json`) records which template version
//! was activated and which external components were installed. Older copies
//! may predate fields that newer tooling expects, so every read goes through
//! [`migrate`], which brings the record up to
//! [`CURRENT_STATE_SCHEMA`](crate::constants::CURRENT_STATE_SCHEMA).
//!
//! Migrations are a list of ordered steps. Each step only fills in missing
//! defaults and bumps `schema_version`; nothing is ever renamed or removed, so
//! running the migration on an already-current record is a no-op.
//!
//! Because this runs automatically on a hot path, [`migrate_file`] never fails
//! on a missing or corrupt file: it reports the situation and leaves the file
//! alone.

use crate::constants::{DEFAULT_TEMPLATE_VERSION, LEGACY_STATE_SCHEMA, UNKNOWN_ACTIVATION};
use crate::core::TmplmergeError;
use crate::utils::fs::write_json_pretty;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Field names of the state record.
pub mod fields {
    /// Integer schema tag.
    pub const SCHEMA_VERSION: &str = "schema_version";
    /// Version of the template that was activated.
    pub const TEMPLATE_VERSION: &str = "template_version";
    /// Activation timestamp, or `"unknown"`.
    pub const ACTIVATED_AT: &str = "activated_at";
    /// Externally installed components.
    pub const EXTERNAL_COMPONENTS: &str = "external_components";
}

/// A migrated state record.
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    /// The record after migration.
    pub state: Map<String, Value>,
    /// Whether anything changed (and the file needs rewriting).
    pub changed: bool,
}

/// What [`migrate_file`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateOutcome {
    /// No state file exists; nothing to do.
    Missing,
    /// The file could not be read or understood and was left untouched.
    Unreadable,
    /// The record was already current.
    Unchanged,
    /// The record was migrated and written back.
    Migrated,
}

type StepFn = fn(&mut Map<String, Value>, Option<&str>);

/// One schema bump: applied to records whose schema is below `target`.
struct Step {
    target: i64,
    apply: StepFn,
}

const STEPS: &[Step] = &[Step {
    target: 2,
    apply: upgrade_to_v2,
}];

/// Schema 2 added the template version, activation time and external components.
fn upgrade_to_v2(state: &mut Map<String, Value>, template_version: Option<&str>) {
    let version = template_version.unwrap_or(DEFAULT_TEMPLATE_VERSION);
    state
        .entry(fields::TEMPLATE_VERSION)
        .or_insert_with(|| Value::String(version.to_string()));
    state
        .entry(fields::ACTIVATED_AT)
        .or_insert_with(|| Value::String(UNKNOWN_ACTIVATION.to_string()));
    state
        .entry(fields::EXTERNAL_COMPONENTS)
        .or_insert_with(|| Value::Object(Map::new()));
}

/// Reads the schema version, defaulting to the legacy version when absent.
///
/// # Errors
///
/// Returns [`TmplmergeError::InvalidState`] if the field is present but not a whole number.
/// Integral floats such as `1.0` are accepted.
pub fn schema_version(state: &Map<String, Value>) -> Result<i64, TmplmergeError> {
    match state.get(fields::SCHEMA_VERSION) {
        None => Ok(LEGACY_STATE_SCHEMA),
        Some(value) => value
            .as_i64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| TmplmergeError::InvalidState {
                reason: format!("{} must be an integer, found {value}", fields::SCHEMA_VERSION),
            }),
    }
}

/// Brings a state record up to the current schema.
///
/// An empty `template_version` counts as not supplied. When one is supplied and
/// differs from the stored value it is stamped even on a current record.
///
/// # Errors
///
/// Returns [`TmplmergeError::InvalidState`] if `schema_version` is not an integer.
///
/// # Examples
///
/// ```
/// use serde_json::{Map, json};
/// use tmplmerge::state::migrate;
///
/// let migration = migrate(Map::new(), None).unwrap();
/// assert!(migration.changed);
/// assert_eq!(migration.state["schema_version"], json!(2));
/// assert_eq!(migration.state["template_version"], json!("1.0.0"));
/// ```
pub fn migrate(
    mut state: Map<String, Value>,
    template_version: Option<&str>,
) -> Result<Migration, TmplmergeError> {
    let template_version = template_version.filter(|v| !v.is_empty());
    let from = schema_version(&state)?;
    let mut changed = false;

    for step in STEPS {
        if from < step.target {
            state.insert(fields::SCHEMA_VERSION.to_string(), Value::from(step.target));
            (step.apply)(&mut state, template_version);
            changed = true;
        }
    }

    if let Some(version) = template_version {
        let current = state.get(fields::TEMPLATE_VERSION).and_then(Value::as_str);
        if current != Some(version) {
            state.insert(fields::TEMPLATE_VERSION.to_string(), Value::String(version.to_string()));
            changed = true;
        }
    }

    Ok(Migration { state, changed })
}

/// Migrates the state file at `path` in place.
///
/// Missing, unreadable and malformed files are reported through the outcome
/// and never modified. The file is rewritten only when something changed.
///
/// # Errors
///
/// Only a failure to write the migrated record is an error.
pub fn migrate_file(path: &Path, template_version: Option<&str>) -> Result<MigrateOutcome> {
    if !path.is_file() {
        tracing::debug!("No state file at {}, nothing to migrate", path.display());
        return Ok(MigrateOutcome::Missing);
    }

    let state = match read_state(path) {
        Ok(state) => state,
        Err(e) => {
            tracing::debug!("Leaving state file {} untouched: {e:#}", path.display());
            return Ok(MigrateOutcome::Unreadable);
        }
    };

    let migration = match migrate(state, template_version) {
        Ok(migration) => migration,
        Err(e) => {
            tracing::debug!("Leaving state file {} untouched: {e}", path.display());
            return Ok(MigrateOutcome::Unreadable);
        }
    };

    if !migration.changed {
        return Ok(MigrateOutcome::Unchanged);
    }

    write_json_pretty(path, &Value::Object(migration.state))
        .with_context(|| format!("Failed to write migrated state: {}", path.display()))?;
    tracing::debug!("Migrated state file {}", path.display());
    Ok(MigrateOutcome::Migrated)
}

fn read_state(path: &Path) -> Result<Map<String, Value>> {
    match crate::utils::fs::read_json_value(path)? {
        Value::Object(state) => Ok(state),
        other => Err(TmplmergeError::InvalidState {
            reason: format!(
                "expected a JSON object, found {}",
                crate::utils::fs::formats::json_kind(&other)
            ),
        }
        .into()),
    }
}

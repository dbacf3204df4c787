//! Constants shared across the tmplmerge codebase.
//!
//! Sentinel markers, template headings and schema numbers live here so the
//! merge modules, the configuration defaults and the tests all agree on the
//! same literal values.

/// Line written before the template block in a merged markdown document.
pub const MARKER_START: &str = "<!-- claude-templates: managed-start -->";

/// Line written after the template block in a merged markdown document.
pub const MARKER_END: &str = "<!-- claude-templates: managed-end -->";

/// Title heading supplied by the base template.
///
/// A section with this heading in an existing document is always dropped; the
/// template brings its own copy.
pub const TEMPLATE_TITLE: &str = "Project Guidelines";

/// Umbrella heading under which user-owned sections are re-emitted.
pub const CUSTOM_HEADING: &str = "Project-Specific";

/// Headings owned by the base template. Existing sections with these headings
/// are replaced on every merge.
pub const DEFAULT_MANAGED_HEADERS: &[&str] = &[
    "Quality Standards",
    "Error Handling Philosophy",
    "Communication Style",
    "Git Workflow",
    "Architecture & Conventions",
    "When to Read Reference Files",
    "Security",
    "Auto-Update Memory (MANDATORY)",
    "Context Discipline",
];

/// Prefix of the aggregated `_comment` field in merged MCP configs.
pub const ENV_VARS_COMMENT_PREFIX: &str = "Required env vars";

/// Current schema version of the activation state file.
pub const CURRENT_STATE_SCHEMA: i64 = 2;

/// Schema version assumed when a state file has no `schema_version` field.
pub const LEGACY_STATE_SCHEMA: i64 = 1;

/// Template version stamped on legacy state files that never recorded one.
pub const DEFAULT_TEMPLATE_VERSION: &str = "1.0.0";

/// Placeholder activation timestamp for legacy state files.
pub const UNKNOWN_ACTIVATION: &str = "unknown";

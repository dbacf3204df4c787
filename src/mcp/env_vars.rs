//! The `_comment` convention for required environment variables.
//!
//! MCP config fragments announce the variables their servers need in a free-text
//! annotation such as `"_comment": "Required env vars: GITHUB_TOKEN, SENTRY_DSN."`.
//! When fragments are merged the variable names are collected, de-duplicated and
//! written back as one sorted comment.

use crate::constants::ENV_VARS_COMMENT_PREFIX;
use std::collections::BTreeSet;

/// Extracts variable names from a `Required env vars: A, B.` style comment.
///
/// Everything after the first `:` is split on `,`. Each token is trimmed and
/// loses any trailing `.`; empty tokens and `none` (any case) are dropped. A
/// comment without a `:` yields nothing.
///
/// ```
/// use tmplmerge::mcp::parse_required_env_vars;
///
/// assert_eq!(parse_required_env_vars("Required env vars: FOO, BAR."), vec!["FOO", "BAR"]);
/// assert!(parse_required_env_vars("Required env vars: none").is_empty());
/// ```
#[must_use]
pub fn parse_required_env_vars(comment: &str) -> Vec<String> {
    let Some((_, vars)) = comment.split_once(':') else {
        return Vec::new();
    };

    vars.trim()
        .split(',')
        .map(|token| token.trim().trim_end_matches('.'))
        .filter(|var| !var.is_empty() && !var.eq_ignore_ascii_case("none"))
        .map(str::to_string)
        .collect()
}

/// Builds the merged comment, or `None` when no variables are required.
#[must_use]
pub fn env_vars_comment(vars: &BTreeSet<String>) -> Option<String> {
    if vars.is_empty() {
        return None;
    }
    let names: Vec<&str> = vars.iter().map(String::as_str).collect();
    Some(format!("{ENV_VARS_COMMENT_PREFIX}: {}", names.join(", ")))
}

//! Re-applying a template to an existing markdown document.
//!
//! The merged document always has the same shape:
//!
//! ```text
//! <!-- claude-templates: managed-start -->
//! ...full base template...
//! <!-- claude-templates: managed-end -->
//!
//! ## Project-Specific
//!
//! ### Some Custom Heading
//! ...user content...
//! ```
//!
//! The trailing `Project-Specific` block is only written when the existing
//! document had something worth keeping. Because the template block is framed
//! by sentinels, running the merge again strips the old template and re-wraps
//! the new one, carrying the custom sections through unchanged.

use super::sections::{Section, split_sections};
use crate::config::MarkdownConfig;
use std::borrow::Cow;

/// Outcome of a markdown merge, with the headings that were kept and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownMerge {
    /// The merged document.
    pub content: String,
    /// Headers of the sections carried over as user content (empty string for
    /// a preamble).
    pub preserved: Vec<String>,
    /// Headers of existing sections superseded by the template.
    pub replaced: Vec<String>,
    /// Whether an earlier managed block was found and stripped.
    pub stripped_previous: bool,
}

/// What happens to one section of the existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    /// Dropped; the template provides it.
    Replace,
    /// Kept verbatim (preamble text).
    KeepVerbatim,
    /// Kept without its heading line (the custom umbrella section).
    KeepContent,
    /// Kept and re-headed as a level-3 heading.
    KeepNested,
}

/// Removes the first sentinel-framed managed block from `content`.
///
/// The block runs from the first occurrence of the start marker to the first
/// occurrence of the end marker after it, inclusive, plus one directly
/// following newline. Any later sentinel text is left in place. Without a
/// complete pair the content is returned unchanged.
#[must_use]
pub fn strip_managed_block<'a>(content: &'a str, config: &MarkdownConfig) -> Cow<'a, str> {
    let Some(start) = content.find(&config.marker_start) else {
        return Cow::Borrowed(content);
    };
    let search_from = start + config.marker_start.len();
    let Some(end_offset) = content[search_from..].find(&config.marker_end) else {
        return Cow::Borrowed(content);
    };

    let mut end = search_from + end_offset + config.marker_end.len();
    if content[end..].starts_with('\n') {
        end += 1;
    }

    Cow::Owned(format!("{}{}", &content[..start], &content[end..]))
}

/// Merges a base template with an existing document.
///
/// Without an existing document the base is returned untouched (first
/// installation). An empty existing document still gets the managed block.
/// See [`merge_markdown_with_report`] for the rules.
#[must_use]
pub fn merge_markdown(base: &str, existing: Option<&str>, config: &MarkdownConfig) -> String {
    match existing {
        Some(existing) => merge_markdown_with_report(base, existing, config).content,
        None => base.to_string(),
    }
}

/// Merges a base template with an existing document and reports what was kept.
///
/// Existing sections are classified as:
/// - preamble (text before the first heading): kept verbatim unless blank or a
///   copy of the template title line
/// - the template title: dropped
/// - the custom umbrella heading: kept, without its heading line
/// - a managed heading: dropped
/// - anything else: kept, re-emitted as `### {header}`
pub fn merge_markdown_with_report(
    base: &str,
    existing: &str,
    config: &MarkdownConfig,
) -> MarkdownMerge {
    let cleaned = strip_managed_block(existing, config);
    let stripped_previous = matches!(cleaned, Cow::Owned(_));

    let mut kept: Vec<(Section, Disposition)> = Vec::new();
    let mut replaced = Vec::new();

    for section in split_sections(&cleaned) {
        match classify(&section, config) {
            Disposition::Replace => {
                if !section.header.is_empty() {
                    replaced.push(section.header.clone());
                }
            }
            disposition => kept.push((section, disposition)),
        }
    }

    let mut out = String::with_capacity(base.len() + existing.len() + 128);
    out.push_str(&config.marker_start);
    out.push('\n');
    out.push_str(base.trim_end());
    out.push('\n');
    out.push_str(&config.marker_end);
    out.push('\n');

    if !kept.is_empty() {
        out.push_str("\n## ");
        out.push_str(&config.custom_heading);
        out.push_str("\n\n");

        for (section, disposition) in &kept {
            match disposition {
                Disposition::KeepVerbatim => out.push_str(&section.body),
                Disposition::KeepContent => out.push_str(section.content()),
                Disposition::KeepNested => {
                    out.push_str("### ");
                    out.push_str(&section.header);
                    out.push('\n');
                    out.push_str(section.content());
                }
                Disposition::Replace => {}
            }
        }
    }

    MarkdownMerge {
        content: out,
        preserved: kept.into_iter().map(|(s, _)| s.header).collect(),
        replaced,
        stripped_previous,
    }
}

fn classify(section: &Section, config: &MarkdownConfig) -> Disposition {
    if section.header.is_empty() {
        let text = section.body.trim();
        let title_line = format!("# {}", config.title);
        return if text.is_empty() || text.starts_with(&title_line) {
            Disposition::Replace
        } else {
            Disposition::KeepVerbatim
        };
    }

    if section.header == config.title {
        Disposition::Replace
    } else if section.header == config.custom_heading {
        Disposition::KeepContent
    } else if config.is_managed(&section.header) {
        Disposition::Replace
    } else {
        Disposition::KeepNested
    }
}

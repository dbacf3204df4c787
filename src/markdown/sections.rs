//! Heading-delimited section splitting for markdown documents.
//!
//! A document is cut at every ATX heading of level 1 to 3. Deeper headings
//! (`####` and beyond) stay inside the enclosing section. The split is
//! lossless: concatenating every [`Section::body`] in order gives back the
//! original text byte for byte.

/// One heading-delimited chunk of a markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Trimmed heading text, or an empty string for the preamble before the
    /// first heading.
    pub header: String,
    /// Original text of the section, including its own heading line.
    pub body: String,
}

impl Section {
    /// The body without its heading line.
    ///
    /// Preamble sections have no heading line and are returned unchanged.
    #[must_use]
    pub fn content(&self) -> &str {
        let first = self.body.split_inclusive('\n').next().unwrap_or("");
        if parse_heading(first).is_some() { &self.body[first.len()..] } else { &self.body }
    }
}

/// Parses an ATX heading line of level 1 to 3 and returns its trimmed text.
///
/// A heading is 1-3 `#` characters, then a whitespace character, then at least
/// one more character before the end of the line. The trailing `\n` (if any)
/// is not part of the heading.
///
/// ```
/// use tmplmerge::markdown::parse_heading;
///
/// assert_eq!(parse_heading("## Git Workflow\n"), Some("Git Workflow"));
/// assert_eq!(parse_heading("#### Too deep\n"), None);
/// assert_eq!(parse_heading("#hashtag\n"), None);
/// ```
#[must_use]
pub fn parse_heading(line: &str) -> Option<&str> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }

    let mut rest = line[hashes..].chars();
    if !rest.next()?.is_whitespace() {
        return None;
    }

    let text = rest.as_str();
    if text.is_empty() { None } else { Some(text.trim()) }
}

/// Splits a markdown document into ordered sections.
///
/// The first section is always the (possibly empty) preamble with an empty
/// header; a document without headings is a single preamble section.
#[must_use]
pub fn split_sections(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut header = String::new();
    let mut start = 0;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        if let Some(text) = parse_heading(line) {
            sections.push(Section {
                header: std::mem::replace(&mut header, text.to_string()),
                body: content[start..offset].to_string(),
            });
            start = offset;
        }
        offset += line.len();
    }

    sections.push(Section {
        header,
        body: content[start..].to_string(),
    });
    sections
}

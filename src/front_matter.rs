//! YAML front matter splitting and parsing.
//!
//! A document may open with a header block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Senior Engineer
//! section: work
//! weight: 10
//! ---
//! Body text starts here.
//! ```
//!
//! The opening marker must be the very first thing in the file. The closing
//! marker is the next line whose trimmed content is exactly `---`.
//!
//! Parsing is forgiving: anything that does not look like well-formed front
//! matter yields an empty mapping rather than an error, so a malformed header
//! degrades into a document with default metadata.

use serde_yaml::{Mapping, Value};

const MARKER: &str = "---";

/// The body of a document once its front matter has been accounted for.
#[derive(Debug, Clone, PartialEq)]
pub enum Body<'a> {
    /// No front matter: the whole text, untouched.
    Plain(&'a str),
    /// Front matter was closed: the text after the closing marker.
    Closed(String),
    /// Opening marker without a closing one: every line after the opener.
    Unclosed(String),
}

impl Body<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            Body::Plain(text) => text,
            Body::Closed(text) | Body::Unclosed(text) => text,
        }
    }
}

/// Index of the closing marker line, counting from the line after the opener.
fn closing_marker(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| line.trim() == MARKER)
}

/// Split a document into its body, dropping the front matter block.
///
/// Leading whitespace of the body is trimmed whenever an opening marker was
/// present, closed or not.
pub fn split_body(text: &str) -> Body<'_> {
    if !text.starts_with(MARKER) {
        return Body::Plain(text);
    }

    let lines: Vec<&str> = text.lines().skip(1).collect();
    match closing_marker(&lines) {
        Some(end) => Body::Closed(lines[end + 1..].join("\n").trim_start().to_string()),
        None => Body::Unclosed(lines.join("\n").trim_start().to_string()),
    }
}

/// Extract the raw YAML between the markers, if the block is well formed.
pub fn header_block(text: &str) -> Option<String> {
    if !text.starts_with(MARKER) {
        return None;
    }
    let lines: Vec<&str> = text.lines().skip(1).collect();
    let end = closing_marker(&lines)?;
    Some(lines[..end].join("\n"))
}

/// Parse the front matter of `text` into a YAML mapping.
///
/// Returns an empty mapping when there is no front matter, when the closing
/// marker is missing, when the header is empty, or when it is not a YAML
/// mapping.
pub fn parse_front_matter(text: &str) -> Mapping {
    let Some(yaml) = header_block(text) else {
        return Mapping::new();
    };

    match serde_yaml::from_str::<Value>(&yaml) {
        Ok(Value::Mapping(mapping)) => mapping,
        Ok(Value::Null) => Mapping::new(),
        Ok(other) => {
            tracing::warn!(kind = ?other, "front matter is not a mapping, ignoring it");
            Mapping::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "front matter is not valid YAML, ignoring it");
            Mapping::new()
        }
    }
}
